//! In-range boundary computation per (source float, destination int) pair.
//!
//! Conversion is defined as truncation toward zero, so a source value is
//! in range exactly when its truncation falls inside the destination's
//! `[MIN, MAX]`. The boundaries of that set are:
//!
//! - `lowest`: the smallest finite source value strictly greater than
//!   `MIN - 1`, and
//! - `highest`: the largest finite source value strictly less than
//!   `MAX + 1`.
//!
//! Neither `MIN - 1` nor `MAX + 1` is usually representable in the source
//! type, so both boundaries are computed at higher arithmetic precision
//! with the primitives in [`crate::arith`] and then truncated onto the
//! source type's representable grid, always toward the safe (in-range)
//! side. The postconditions are harness-construction invariants: if any
//! fails, the boundary math itself is defective and the run aborts.

use crate::arith::{
    largest_below_one, round_down_to_precision, rounded_down_sum, u64_to_rounded_down_f64,
    ArithFloat,
};
use crate::error::{ensure, Result};
use crate::types::{DestInt, SourceFloat};

/// Inclusive range of source values that convert safely to the destination.
///
/// Created once per type pair at test setup, read-only thereafter.
#[derive(Debug, Clone, Copy)]
pub struct ConversionBounds<F: SourceFloat> {
    /// Smallest in-range source value (negative, possibly fractional)
    pub lowest: F,
    /// Largest in-range source value (positive)
    pub highest: F,
}

impl<F: SourceFloat> ConversionBounds<F> {
    /// Compute the in-range boundaries for conversion into `I`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConvalidarError::InvariantViolation`] when a
    /// postcondition fails, which indicates a defect in the boundary
    /// computation rather than in any backend under test.
    pub fn compute<I: DestInt>() -> Result<Self> {
        let precision = F::MANTISSA_BITS + 1;

        // lowest: computed natively in F's arithmetic type. I::MIN is zero
        // or a power of two, so widening it is exact.
        let int_min = <F::Arith>::from_f64_lossy(I::MIN_I64 as f64);
        let below_min = rounded_down_sum(int_min, -largest_below_one::<F::Arith>());
        let low_candidate = round_down_to_precision(below_min, precision);
        let from_min = F::min_finite().to_arith();
        let lowest_arith = if from_min > low_candidate {
            from_min
        } else {
            low_candidate
        };
        let lowest = F::from_arith(lowest_arith);

        // highest: I::MAX is not a power of two, so it is first lowered
        // onto the f64 grid without rounding up, nudged to just under
        // MAX + 1, then truncated to F's precision. Every step keeps the
        // value exactly representable after narrowing.
        let below_max_plus_one = rounded_down_sum(
            u64_to_rounded_down_f64(I::MAX_U64),
            largest_below_one::<f64>(),
        );
        let high_candidate = round_down_to_precision(below_max_plus_one, precision);
        let from_max = F::max_finite().to_f64();
        let highest_f64 = if from_max < high_candidate {
            from_max
        } else {
            high_candidate
        };
        let highest = F::from_arith(<F::Arith>::from_f64_lossy(highest_f64));

        let bounds = Self { lowest, highest };
        bounds.validate::<I>()?;
        Ok(bounds)
    }

    /// Postconditions from the boundary derivation.
    fn validate<I: DestInt>(&self) -> Result<()> {
        let pair = format!("{}->{}", F::NAME, I::NAME);
        let low = self.lowest.to_f64();
        let high = self.highest.to_f64();

        ensure(self.lowest.is_finite(), "lowest is finite", || pair.clone())?;
        ensure(low < 0.0, "lowest < 0", || format!("{pair}: lowest = {low}"))?;
        ensure(
            low >= i64::MIN as f64,
            "lowest >= i64::MIN",
            || format!("{pair}: lowest = {low}"),
        )?;

        let low_trunc = low as i64;
        ensure(
            low_trunc <= 0 && low_trunc >= I::MIN_I64,
            "trunc(lowest) within [I::MIN, 0]",
            || format!("{pair}: trunc(lowest) = {low_trunc}"),
        )?;

        ensure(self.highest.is_finite(), "highest is finite", || {
            pair.clone()
        })?;
        ensure(high > 0.0, "highest > 0", || {
            format!("{pair}: highest = {high}")
        })?;
        ensure(
            high < 18_446_744_073_709_551_616.0, // 2^64
            "highest < 2^64",
            || format!("{pair}: highest = {high}"),
        )?;

        let high_trunc = high as u64;
        ensure(
            high_trunc > 0 && high_trunc <= I::MAX_U64,
            "trunc(highest) within (0, I::MAX]",
            || format!("{pair}: trunc(highest) = {high_trunc}"),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_f32_to_i32_bounds() {
        let b = ConversionBounds::<f32>::compute::<i32>().unwrap();
        assert_eq!(b.lowest, -2_147_483_648.0);
        // Largest f32 strictly below 2^31
        assert_eq!(b.highest, 2_147_483_520.0);
    }

    #[test]
    fn test_f32_to_u32_bounds() {
        let b = ConversionBounds::<f32>::compute::<u32>().unwrap();
        assert_eq!(b.lowest, -largest_below_one::<f32>());
        // Largest f32 strictly below 2^32
        assert_eq!(b.highest, 4_294_967_040.0);
    }

    #[test]
    fn test_f64_to_i32_bounds() {
        let b = ConversionBounds::<f64>::compute::<i32>().unwrap();
        // Largest f64 above i32::MIN - 1, i.e. -(2^31 + 1) + 2^-21
        assert_eq!(b.lowest, -2_147_483_648.999_999_523_162_841_8);
        assert_eq!(b.lowest as i64, i64::from(i32::MIN));
        // Largest f64 strictly below 2^31
        assert!(b.highest < 2_147_483_648.0);
        assert_eq!(b.highest as i64, i64::from(i32::MAX));
    }

    #[test]
    fn test_f64_to_u64_bounds() {
        let b = ConversionBounds::<f64>::compute::<u64>().unwrap();
        assert_eq!(b.highest, 18_446_744_073_709_549_568.0);
        assert!(b.lowest > -1.0);
    }

    #[test]
    fn test_f64_to_i64_bounds() {
        let b = ConversionBounds::<f64>::compute::<i64>().unwrap();
        assert_eq!(b.lowest, -9_223_372_036_854_775_808.0);
        assert_eq!(b.highest, 9_223_372_036_854_774_784.0);
    }

    #[test]
    fn test_f32_to_i64_bounds() {
        let b = ConversionBounds::<f32>::compute::<i64>().unwrap();
        assert_eq!(b.lowest, -9_223_372_036_854_775_808.0f32);
        // Largest f32 strictly below 2^63
        assert_eq!(b.highest, 9_223_371_487_098_961_920.0f32);
    }

    #[test]
    fn test_f32_to_u64_bounds() {
        let b = ConversionBounds::<f32>::compute::<u64>().unwrap();
        // Largest f32 strictly below 2^64
        assert_eq!(b.highest, 18_446_742_974_197_923_840.0f32);
    }

    #[test]
    fn test_f16_to_i16_bounds() {
        let b = ConversionBounds::<f16>::compute::<i16>().unwrap();
        assert_eq!(b.lowest, f16::from_f32(-32768.0));
        assert_eq!(b.highest, f16::from_f32(32752.0));
    }

    #[test]
    fn test_f16_to_u16_bounds() {
        let b = ConversionBounds::<f16>::compute::<u16>().unwrap();
        // All finite f16 values sit below 65536, so the float's own maximum
        // is the boundary.
        assert_eq!(b.highest, f16::MAX);
        assert!(b.lowest.to_f64() > -1.0);
    }

    #[test]
    fn test_bounds_are_tight() {
        // One representable step past either boundary leaves the range.
        let b = ConversionBounds::<f32>::compute::<i32>().unwrap();
        let above_highest = <f32 as SourceFloat>::from_bits64(SourceFloat::to_bits64(b.highest) + 1);
        assert_eq!(above_highest, 2_147_483_648.0);
        assert!(SourceFloat::to_f64(above_highest) > i32::MAX as f64);

        let below_lowest = <f32 as SourceFloat>::from_bits64(SourceFloat::to_bits64(b.lowest) + 1); // more negative
        assert!(SourceFloat::to_f64(below_lowest) < (i32::MIN as f64) - 1.0);
    }

    #[test]
    fn test_truncation_monotone_at_highest() {
        let b = ConversionBounds::<f32>::compute::<i32>().unwrap();
        let step_down = <f32 as SourceFloat>::from_bits64(SourceFloat::to_bits64(b.highest) - 1);
        assert!(i32::truncate_from_f64(SourceFloat::to_f64(step_down)) <= b.highest as i32);
    }
}
