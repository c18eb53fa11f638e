//! Scalar mock backend that honors the fast-conversion contract.
//!
//! Used by the harness's own tests and by doc examples. Out-of-range lanes
//! resolve to all-zeros or all-ones based on the input's sign bit; the
//! choice is arbitrary within the two-valued contract and deliberately
//! exercises both patterns.

use crate::convert::{ConversionProvider, FastConvert};
use crate::types::{DestInt, SourceFloat};

/// Conforming software implementation of [`FastConvert`] for every pair.
#[derive(Debug, Clone)]
pub struct MockSimd {
    lanes: usize,
}

impl MockSimd {
    /// Create a mock target with the given (even, nonzero) lane count.
    #[must_use]
    pub fn new(lanes: usize) -> Self {
        debug_assert!(lanes >= 2 && lanes % 2 == 0);
        Self { lanes }
    }
}

/// True when truncating `value` lands inside `I`'s range.
///
/// The comparisons run in `f64` against power-of-two limits, which are
/// exactly representable at every destination width.
fn in_range<F: SourceFloat, I: DestInt>(value: F) -> bool {
    if !value.is_finite() {
        return false;
    }
    let x = value.to_f64();

    let lower_ok = if I::SIGNED {
        let limit = -((1u128 << (I::BITS - 1)) as f64);
        // in range iff x > MIN - 1; at 64 bits f64 cannot represent
        // anything strictly between the two expressions
        x >= limit || x > limit - 1.0
    } else {
        x > -1.0
    };

    let upper_excl = (1u128 << (I::BITS - u32::from(I::SIGNED))) as f64;
    lower_ok && x < upper_excl
}

fn convert_scalar<F: SourceFloat, I: DestInt>(value: F) -> I {
    if in_range::<F, I>(value) {
        I::truncate_from_f64(value.to_f64())
    } else if value.to_bits64() & F::sign_mask64() != 0 {
        I::from_u64_bits(u64::MAX)
    } else {
        I::from_u64_bits(0)
    }
}

impl<F: SourceFloat, I: DestInt> FastConvert<F, I> for MockSimd {
    fn lanes(&self) -> usize {
        self.lanes
    }

    fn fast_convert(&self, src: &[F], dst: &mut [I]) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = convert_scalar::<F, I>(s);
        }
    }

    fn half_width_supported(&self) -> bool {
        true
    }

    fn fast_promote_lower(&self, src: &[F], dst: &mut [I]) {
        let half = src.len() / 2;
        for (d, &s) in dst.iter_mut().zip(src[..half].iter()) {
            *d = convert_scalar::<F, I>(s);
        }
    }

    fn fast_promote_upper(&self, src: &[F], dst: &mut [I]) {
        for (d, &s) in dst.iter_mut().zip(src[src.len() / 2..].iter()) {
            *d = convert_scalar::<F, I>(s);
        }
    }

    fn fast_promote_even(&self, src: &[F], dst: &mut [I]) {
        for (d, &s) in dst.iter_mut().zip(src.iter().step_by(2)) {
            *d = convert_scalar::<F, I>(s);
        }
    }

    fn fast_promote_odd(&self, src: &[F], dst: &mut [I]) {
        for (d, &s) in dst.iter_mut().zip(src.iter().skip(1).step_by(2)) {
            *d = convert_scalar::<F, I>(s);
        }
    }
}

impl ConversionProvider for MockSimd {
    fn converter<F: SourceFloat, I: DestInt>(&self) -> Option<&dyn FastConvert<F, I>> {
        Some(self)
    }
}
