//! Type descriptors for source floats and destination integers.
//!
//! Every fact the harness needs about a concrete type is a compile-time
//! constant on one of two traits:
//!
//! - [`SourceFloat`]: the floating-point types whose conversions are under
//!   test (`half::f16`, `f32`, `f64`), described by their IEEE 754 field
//!   layout plus bit-level reinterpretation in and out of a `u64`.
//! - [`DestInt`]: the destination integer types (`i16`/`u16` through
//!   `i64`/`u64`), described by width, signedness, and limits.
//!
//! All bit manipulation in the harness happens on `u64` words holding the
//! low `BITS` bits of a value's storage; the traits own the only two
//! reinterpret-cast seams (`from_bits64`/`to_bits64`). Arithmetic on the
//! abstract numeric value never stands in for bit-pattern work.

use crate::arith::ArithFloat;
use half::f16;
use std::fmt;

/// A floating-point source type under test.
///
/// `MANTISSA_BITS` counts the explicitly stored fraction bits (10/23/52),
/// excluding the implicit leading bit. Boundary computations use
/// `MANTISSA_BITS + 1` bits of precision.
pub trait SourceFloat: Copy + PartialOrd + fmt::Debug + 'static {
    /// Arithmetic type boundary constants are computed in: `f32` for
    /// sources up to 32 bits wide, `f64` otherwise. Widening a value of
    /// this type into `Arith` is always exact.
    type Arith: ArithFloat;

    /// Short type name used in reports, e.g. `"f32"`
    const NAME: &'static str;
    /// Storage width in bits
    const BITS: u32;
    /// Explicitly stored mantissa bits (excludes the implicit leading bit)
    const MANTISSA_BITS: u32;
    /// Width of the biased exponent field
    const EXPONENT_BITS: u32;
    /// Exponent bias
    const EXPONENT_BIAS: i32;

    /// Reinterpret the low `BITS` bits of `bits` as a value of this type.
    fn from_bits64(bits: u64) -> Self;
    /// Reinterpret this value's storage as the low `BITS` bits of a `u64`.
    fn to_bits64(self) -> u64;
    /// Narrow from the arithmetic type (round to nearest).
    fn from_arith(v: Self::Arith) -> Self;
    /// Widen into the arithmetic type (exact).
    fn to_arith(self) -> Self::Arith;
    /// Widen to `f64` (exact for every source type here).
    fn to_f64(self) -> f64;
    /// True when the value is neither Infinity nor NaN.
    fn is_finite(self) -> bool;
    /// Most negative finite value.
    fn min_finite() -> Self;
    /// Largest finite value.
    fn max_finite() -> Self;

    /// Mask covering the full storage width.
    #[must_use]
    fn width_mask64() -> u64 {
        if Self::BITS == 64 {
            u64::MAX
        } else {
            (1u64 << Self::BITS) - 1
        }
    }

    /// Mask covering the stored mantissa bits.
    #[must_use]
    fn mantissa_mask64() -> u64 {
        (1u64 << Self::MANTISSA_BITS) - 1
    }

    /// Mask covering the biased exponent field.
    #[must_use]
    fn exponent_mask64() -> u64 {
        ((1u64 << Self::EXPONENT_BITS) - 1) << Self::MANTISSA_BITS
    }

    /// Mask covering the sign bit.
    #[must_use]
    fn sign_mask64() -> u64 {
        1u64 << (Self::BITS - 1)
    }

    /// Largest value of the biased exponent field (the Inf/NaN encoding).
    #[must_use]
    fn max_biased_exponent() -> u64 {
        (1u64 << Self::EXPONENT_BITS) - 1
    }
}

impl SourceFloat for f16 {
    type Arith = f32;

    const NAME: &'static str = "f16";
    const BITS: u32 = 16;
    const MANTISSA_BITS: u32 = 10;
    const EXPONENT_BITS: u32 = 5;
    const EXPONENT_BIAS: i32 = 15;

    fn from_bits64(bits: u64) -> Self {
        f16::from_bits(bits as u16)
    }

    fn to_bits64(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn from_arith(v: f32) -> Self {
        f16::from_f32(v)
    }

    fn to_arith(self) -> f32 {
        self.to_f32()
    }

    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    fn is_finite(self) -> bool {
        f16::is_finite(self)
    }

    fn min_finite() -> Self {
        f16::MIN
    }

    fn max_finite() -> Self {
        f16::MAX
    }
}

impl SourceFloat for f32 {
    type Arith = f32;

    const NAME: &'static str = "f32";
    const BITS: u32 = 32;
    const MANTISSA_BITS: u32 = 23;
    const EXPONENT_BITS: u32 = 8;
    const EXPONENT_BIAS: i32 = 127;

    fn from_bits64(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }

    fn to_bits64(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn from_arith(v: f32) -> Self {
        v
    }

    fn to_arith(self) -> f32 {
        self
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    fn min_finite() -> Self {
        f32::MIN
    }

    fn max_finite() -> Self {
        f32::MAX
    }
}

impl SourceFloat for f64 {
    type Arith = f64;

    const NAME: &'static str = "f64";
    const BITS: u32 = 64;
    const MANTISSA_BITS: u32 = 52;
    const EXPONENT_BITS: u32 = 11;
    const EXPONENT_BIAS: i32 = 1023;

    fn from_bits64(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    fn to_bits64(self) -> u64 {
        self.to_bits()
    }

    fn from_arith(v: f64) -> Self {
        v
    }

    fn to_arith(self) -> f64 {
        self
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn min_finite() -> Self {
        f64::MIN
    }

    fn max_finite() -> Self {
        f64::MAX
    }
}

/// A destination integer type under test.
pub trait DestInt: Copy + Eq + fmt::Debug + 'static {
    /// Short type name used in reports, e.g. `"i32"`
    const NAME: &'static str;
    /// Storage width in bits
    const BITS: u32;
    /// True for two's-complement signed types
    const SIGNED: bool;
    /// Minimum value, widened to `i64` (zero for unsigned types)
    const MIN_I64: i64;
    /// Maximum value, widened to `u64`
    const MAX_U64: u64;

    /// Truncate `v` toward zero into this type.
    ///
    /// This is the scalar reference oracle; callers guarantee `v` truncates
    /// inside `[MIN, MAX]`.
    fn truncate_from_f64(v: f64) -> Self;
    /// Reinterpret the low `BITS` bits of `bits` as a value of this type.
    fn from_u64_bits(bits: u64) -> Self;
    /// Reinterpret this value's two's-complement storage as the low `BITS`
    /// bits of a `u64` (zero-extended).
    fn to_u64_bits(self) -> u64;

    /// All-ones bit pattern at this type's width.
    #[must_use]
    fn all_ones_bits() -> u64 {
        if Self::BITS == 64 {
            u64::MAX
        } else {
            (1u64 << Self::BITS) - 1
        }
    }
}

macro_rules! impl_dest_int {
    ($ty:ty, $unsigned:ty, $name:literal, $signed:expr) => {
        impl DestInt for $ty {
            const NAME: &'static str = $name;
            const BITS: u32 = <$ty>::BITS;
            const SIGNED: bool = $signed;
            const MIN_I64: i64 = <$ty>::MIN as i64;
            const MAX_U64: u64 = <$ty>::MAX as u64;

            fn truncate_from_f64(v: f64) -> Self {
                v as $ty
            }

            fn from_u64_bits(bits: u64) -> Self {
                bits as $ty
            }

            fn to_u64_bits(self) -> u64 {
                self as $unsigned as u64
            }
        }
    };
}

impl_dest_int!(i16, u16, "i16", true);
impl_dest_int!(u16, u16, "u16", false);
impl_dest_int!(i32, u32, "i32", true);
impl_dest_int!(u32, u32, "u32", false);
impl_dest_int!(i64, u64, "i64", true);
impl_dest_int!(u64, u64, "u64", false);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_field_masks() {
        assert_eq!(f32::mantissa_mask64(), 0x007F_FFFF);
        assert_eq!(f32::exponent_mask64(), 0x7F80_0000);
        assert_eq!(f32::sign_mask64(), 0x8000_0000);
        assert_eq!(f32::max_biased_exponent(), 255);
        assert_eq!(f32::width_mask64(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_f64_field_masks() {
        assert_eq!(f64::mantissa_mask64(), 0x000F_FFFF_FFFF_FFFF);
        assert_eq!(f64::exponent_mask64(), 0x7FF0_0000_0000_0000);
        assert_eq!(f64::sign_mask64(), 0x8000_0000_0000_0000);
        assert_eq!(f64::width_mask64(), u64::MAX);
    }

    #[test]
    fn test_f16_roundtrip_through_bits() {
        let v = f16::from_f32(1.5);
        assert_eq!(f16::from_bits64(v.to_bits64()), v);
        assert_eq!(v.to_bits64(), 0x3E00);
    }

    #[test]
    fn test_bit_reinterpret_ignores_high_garbage() {
        // from_bits64 must only consume the low BITS bits
        let one = <f32 as SourceFloat>::from_bits64(0xDEAD_BEEF_3F80_0000);
        assert_eq!(one, 1.0f32);
    }

    #[test]
    fn test_dest_int_limits() {
        assert_eq!(i32::MIN_I64, -2_147_483_648);
        assert_eq!(i32::MAX_U64, 2_147_483_647);
        assert_eq!(u64::MIN_I64, 0);
        assert_eq!(u64::MAX_U64, u64::MAX);
        assert_eq!(i16::all_ones_bits(), 0xFFFF);
        assert_eq!(u64::all_ones_bits(), u64::MAX);
    }

    #[test]
    fn test_dest_int_bit_reinterpret() {
        assert_eq!(i16::from_u64_bits(0xFFFF), -1i16);
        assert_eq!((-1i16).to_u64_bits(), 0xFFFF);
        assert_eq!(i64::from_u64_bits(u64::MAX), -1i64);
        assert_eq!((-1i64).to_u64_bits(), u64::MAX);
        assert_eq!(0u32.to_u64_bits(), 0);
    }

    #[test]
    fn test_truncation_is_toward_zero() {
        assert_eq!(i32::truncate_from_f64(-1.9), -1);
        assert_eq!(i32::truncate_from_f64(1.9), 1);
        assert_eq!(u32::truncate_from_f64(0.9), 0);
        assert_eq!(i64::truncate_from_f64(-9_223_372_036_854_775_808.0), i64::MIN);
    }
}
