//! Randomized input generation for the conformance batteries.
//!
//! Two samplers draw from a deterministic [`BitStream`] and construct
//! source-float bit patterns directly from exponent/mantissa/sign fields:
//!
//! - [`InRangeSampler`] produces finite values inside `[lowest, highest]`
//!   by capping the biased exponent below the smallest exponent that could
//!   push a value out of the destination's range.
//! - [`OutOfRangeSampler`] produces values that are never simultaneously
//!   finite and in range, by drawing magnitudes strictly above the larger
//!   in-range boundary's bit pattern (this region also covers the Inf and
//!   NaN encodings).
//!
//! Both guarantees hold by construction and are re-checked defensively at
//! sample time; a violation is a harness-construction error, not a
//! conformance failure.

use crate::bounds::ConversionBounds;
use crate::error::{ensure, Result};
use crate::types::{DestInt, SourceFloat};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Deterministic 64-bit word stream.
///
/// Owned by the orchestrator for the duration of one (source, destination)
/// pair test and reseeded at the start of each such test, so any failing
/// bit pattern can be replayed within a run. Not cryptographic.
#[derive(Debug)]
pub struct BitStream {
    rng: StdRng,
}

impl BitStream {
    /// Create a stream with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next 64-bit word.
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Uniform generator of finite, in-range source bit patterns.
#[derive(Debug)]
pub struct InRangeSampler<F: SourceFloat> {
    lowest: F,
    highest: F,
    /// Smallest biased exponent that could push a value out of range
    min_out_of_range_exp: u64,
    /// Mantissa bits, plus the sign bit for signed destinations
    mant_sign_mask: u64,
}

impl<F: SourceFloat> InRangeSampler<F> {
    /// Derive the sampler for conversion into `I`.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation when the derived exponent cap is
    /// degenerate, which would indicate a defect in the descriptor data.
    pub fn new<I: DestInt>(bounds: &ConversionBounds<F>) -> Result<Self> {
        let max_exp = F::max_biased_exponent();
        let bias = max_exp >> 1;

        // A magnitude below 2^(I::BITS - signedness) always truncates into
        // range, so any biased exponent below bias + that power is safe.
        let min_out_of_range_exp =
            (bias + u64::from(I::BITS) - u64::from(I::SIGNED)).min(max_exp);
        ensure(
            min_out_of_range_exp > 0,
            "min out-of-range biased exponent > 0",
            || format!("{}->{}", F::NAME, I::NAME),
        )?;

        let mant_sign_mask = !F::exponent_mask64()
            & if I::SIGNED {
                F::width_mask64()
            } else {
                // unsigned destinations never see negative in-range samples
                F::width_mask64() >> 1
            };

        Ok(Self {
            lowest: bounds.lowest,
            highest: bounds.highest,
            min_out_of_range_exp,
            mant_sign_mask,
        })
    }

    /// Draw one in-range value.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the constructed value is not
    /// finite and inside `[lowest, highest]`.
    pub fn sample(&self, stream: &mut BitStream) -> Result<F> {
        let word = stream.next_u64();

        let exp_field = ((word >> F::MANTISSA_BITS) % self.min_out_of_range_exp)
            << F::MANTISSA_BITS;
        let value = F::from_bits64((word & self.mant_sign_mask) | exp_field);

        ensure(
            value.is_finite() && value >= self.lowest && value <= self.highest,
            "in-range sample is finite and within bounds",
            || format!("{}: bits {:#x}", F::NAME, value.to_bits64()),
        )?;
        Ok(value)
    }
}

/// Generator of out-of-range, Infinity, and NaN source bit patterns.
#[derive(Debug)]
pub struct OutOfRangeSampler<F: SourceFloat> {
    lowest: F,
    highest: F,
    /// Smallest magnitude bit pattern that is out of range for both signs
    min_magnitude_bits: u64,
    /// Number of distinct out-of-range magnitudes
    modulus: u64,
}

impl<F: SourceFloat> OutOfRangeSampler<F> {
    /// Derive the sampler from the pair's bounds.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation when no out-of-range magnitude
    /// exists, which cannot happen for the supported type pairs.
    pub fn new(bounds: &ConversionBounds<F>) -> Result<Self> {
        let signed_max = F::width_mask64() >> 1;
        let lowest_bits = bounds.lowest.to_bits64();
        let highest_bits = bounds.highest.to_bits64();

        // The first magnitude past both boundaries. Masking the sign off
        // `lowest` compares the negative boundary by magnitude.
        let min_magnitude_bits = (lowest_bits & signed_max).max(highest_bits) + 1;

        ensure(
            min_magnitude_bits > highest_bits,
            "min out-of-range bits > highest in-range bits",
            || format!("{}: {min_magnitude_bits:#x}", F::NAME),
        )?;
        ensure(
            min_magnitude_bits <= signed_max,
            "min out-of-range bits within finite-or-NaN magnitude space",
            || format!("{}: {min_magnitude_bits:#x}", F::NAME),
        )?;

        Ok(Self {
            lowest: bounds.lowest,
            highest: bounds.highest,
            min_magnitude_bits,
            modulus: signed_max - min_magnitude_bits + 1,
        })
    }

    /// Draw one out-of-range value (finite overflow, Infinity, or NaN).
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the constructed value is finite
    /// and in range.
    pub fn sample(&self, stream: &mut BitStream) -> Result<F> {
        let word = stream.next_u64();

        let magnitude = (word % self.modulus) + self.min_magnitude_bits;
        let value = F::from_bits64(magnitude | (word & F::sign_mask64()));

        ensure(
            !(value.is_finite() && value >= self.lowest && value <= self.highest),
            "out-of-range sample is not finite-and-in-range",
            || format!("{}: bits {:#x}", F::NAME, value.to_bits64()),
        )?;
        Ok(value)
    }
}
