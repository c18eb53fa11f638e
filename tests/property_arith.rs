//! Property tests for the extended-precision boundary arithmetic.

use convalidar::arith::{
    largest_below_one, round_down_to_precision, rounded_down_sum, u64_to_rounded_down_f64,
};
use proptest::prelude::*;

proptest! {
    /// The compensated sum never exceeds the naive sum in magnitude and
    /// stays within one representable step of it.
    #[test]
    fn prop_rounded_down_sum_truncates_toward_zero(
        hi in -1.0e15f64..1.0e15,
        lo in -1.0f64..1.0,
    ) {
        prop_assume!(hi.abs() >= lo.abs());
        let naive = hi + lo;
        prop_assume!(naive != 0.0);

        let result = rounded_down_sum(hi, lo);
        prop_assert!(result.abs() <= naive.abs());

        let step = i64::abs(result.to_bits() as i64 - naive.to_bits() as i64);
        prop_assert!(step <= 1, "result {result} is {step} steps from {naive}");
    }

    /// Dropping precision only ever moves a value toward zero, clears the
    /// discarded mantissa bits, and is idempotent.
    #[test]
    fn prop_round_down_to_precision_truncates(
        value in any::<f64>().prop_filter("finite", |v| v.is_finite()),
        precision in 1u32..=53,
    ) {
        let rounded = round_down_to_precision(value, precision);
        prop_assert!(rounded.abs() <= value.abs());

        let cleared = 53 - precision;
        let low_mask = (1u64 << cleared) - 1;
        prop_assert_eq!(rounded.to_bits() & low_mask, 0);

        prop_assert_eq!(
            round_down_to_precision(rounded, precision).to_bits(),
            rounded.to_bits()
        );
    }

    /// Full precision is the identity.
    #[test]
    fn prop_full_precision_is_identity(
        value in any::<f64>().prop_filter("finite", |v| v.is_finite()),
    ) {
        prop_assert_eq!(round_down_to_precision(value, 53).to_bits(), value.to_bits());
    }

    /// The split conversion never rounds up and never drifts more than the
    /// worst-case two half-ulps at 64-bit magnitude.
    #[test]
    fn prop_u64_conversion_rounds_down(value in any::<u64>()) {
        let converted = u64_to_rounded_down_f64(value);
        prop_assert!(converted >= 0.0);
        prop_assert!(converted as u64 <= value);
        prop_assert!(value as f64 - converted <= 4096.0);
    }

    /// For values a f64 mantissa holds exactly, the split conversion is
    /// the plain cast.
    #[test]
    fn prop_u64_conversion_exact_below_2_53(value in 0u64..(1 << 53)) {
        prop_assert_eq!(u64_to_rounded_down_f64(value), value as f64);
    }
}

#[test]
fn test_largest_below_one_is_one_ulp_below() {
    let below: f64 = largest_below_one();
    assert!(below < 1.0);
    assert_eq!(f64::from_bits(below.to_bits() + 1), 1.0);

    let below: f32 = largest_below_one();
    assert!(below < 1.0);
    assert_eq!(f32::from_bits(below.to_bits() + 1), 1.0);
}
