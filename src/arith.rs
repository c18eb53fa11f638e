//! Extended-precision arithmetic primitives for boundary constants.
//!
//! The in-range boundaries of a float-to-int conversion sit next to integer
//! limits that the source float often cannot represent exactly. Computing
//! them with ordinary floating addition would round twice: once in the wide
//! arithmetic type and again when narrowing into the source type. The
//! primitives here avoid that double rounding:
//!
//! - [`rounded_down_sum`] adds two floats and pushes any lost residual back
//!   into the result by stepping its bit pattern, so the sum never lands on
//!   the unsafe side of a boundary.
//! - [`round_down_to_precision`] truncates a value's stored mantissa so the
//!   result stays exactly representable after narrowing to a
//!   lower-precision source type.
//! - [`u64_to_rounded_down_f64`] converts a 64-bit integer to the nearest
//!   `f64` that does not exceed it.
//!
//! All of them work on bit patterns through [`ArithFloat`], implemented for
//! the two arithmetic carrier types `f32` and `f64`.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Floating-point type usable as an arithmetic carrier for boundary math.
pub trait ArithFloat:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + fmt::Debug
    + 'static
{
    /// Storage width in bits
    const BITS: u32;
    /// Explicitly stored mantissa bits
    const MANTISSA_BITS: u32;

    /// Reinterpret the low `BITS` bits of `bits` as a value.
    fn from_bits64(bits: u64) -> Self;
    /// Reinterpret storage as the low `BITS` bits of a `u64`.
    fn to_bits64(self) -> u64;
    /// Narrow from `f64` (round to nearest).
    fn from_f64_lossy(v: f64) -> Self;
    /// Widen to `f64` (exact).
    fn to_f64(self) -> f64;
}

impl ArithFloat for f32 {
    const BITS: u32 = 32;
    const MANTISSA_BITS: u32 = 23;

    fn from_bits64(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }

    fn to_bits64(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn from_f64_lossy(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl ArithFloat for f64 {
    const BITS: u32 = 64;
    const MANTISSA_BITS: u32 = 52;

    fn from_bits64(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    fn to_bits64(self) -> u64 {
        self.to_bits()
    }

    fn from_f64_lossy(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Largest representable value strictly less than 1.
///
/// Computed by decrementing the bit pattern of `1.0` by one unit in the
/// last place. Adding it to an exact integer boundary yields the largest
/// float strictly less than `boundary + 1`.
#[must_use]
pub fn largest_below_one<A: ArithFloat>() -> A {
    A::from_bits64(A::from_f64_lossy(1.0).to_bits64() - 1)
}

/// `hi + lo` with the lost residual folded back toward the exact sum.
///
/// Valid only when `|hi| >= |lo|` or `hi == 0`. Computes the naive sum,
/// recovers the rounding error with a second subtraction, and steps the
/// sum's bit pattern by one ulp when the error is nonzero and its sign
/// disagrees with the sum's. The result is the exact sum truncated onto
/// the representable grid (magnitude never rounded away from zero), which
/// for the positive operands used in boundary math is rounding toward
/// negative infinity.
#[must_use]
pub fn rounded_down_sum<A: ArithFloat>(hi: A, lo: A) -> A {
    debug_assert!(
        hi.to_f64().abs() >= lo.to_f64().abs() || hi.to_f64() == 0.0,
        "rounded_down_sum requires |hi| >= |lo| or hi == 0"
    );

    let sum = hi + lo;
    let err = (hi - sum) + lo;

    let sum_bits = sum.to_bits64();
    let err_bits = err.to_bits64();

    let sign_differs = ((sum_bits ^ err_bits) >> (A::BITS - 1)) & 1;
    let adjust = sign_differs & u64::from(err.to_f64() != 0.0);

    A::from_bits64(sum_bits.wrapping_sub(adjust))
}

/// Truncate `val` to at most `precision_bits` bits of mantissa precision.
///
/// `precision_bits` counts the implicit leading bit, so passing a source
/// type's `MANTISSA_BITS + 1` leaves exactly the bits that survive
/// narrowing into that type. Clears low-order stored mantissa bits, which
/// truncates the magnitude toward zero; monotone, never round-to-nearest.
#[must_use]
pub fn round_down_to_precision<A: ArithFloat>(val: A, precision_bits: u32) -> A {
    debug_assert!(precision_bits > 0);

    let total_precision = A::MANTISSA_BITS + 1;
    let bits_to_clear = total_precision.saturating_sub(precision_bits);
    let clear_mask = (1u64 << bits_to_clear) - 1;

    A::from_bits64(val.to_bits64() & !clear_mask)
}

/// Convert a 64-bit unsigned integer to the nearest `f64` not exceeding it.
///
/// A plain cast rounds to nearest and can land above the integer. Splitting
/// into a high part (top 11 bits, exactly representable) and a 53-bit low
/// part keeps both halves exact, and [`rounded_down_sum`] combines them
/// without rounding up.
#[must_use]
pub fn u64_to_rounded_down_f64(val: u64) -> f64 {
    const HIGH_MASK: u64 = 0xFFE0_0000_0000_0000;
    const LOW_MASK: u64 = 0x001F_FFFF_FFFF_FFFF;

    let hi = (val & HIGH_MASK) as f64;
    let lo = (val & LOW_MASK) as f64;

    rounded_down_sum(hi, lo)
}
