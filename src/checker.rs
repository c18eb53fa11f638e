//! Lane-level conversion invariant checks.
//!
//! Three checks cover the whole conformance contract:
//!
//! - [`check_exact`]: in-range lanes must match the scalar truncation
//!   oracle bit for bit.
//! - [`check_relaxed`]: out-of-range, Infinity, and NaN lanes must be
//!   exactly all-zeros or all-ones at destination width. The contract is
//!   deliberately two-valued; the checker never constrains *which* of the
//!   two patterns a given input produces.
//! - [`check_interleaved`]: a special value planted in every other lane
//!   must stay confined to its own lane, leaving the surviving in-range
//!   lanes exact.

use crate::convert::FastConvert;
use crate::error::{ConvalidarError, Result};
use crate::types::{DestInt, SourceFloat};

/// Where a failing lane came from, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Type pair name, e.g. `f64->u32`
    pub pair: &'a str,
    /// Battery name, e.g. `in-range`
    pub battery: &'static str,
    /// Repetition index within the battery
    pub rep: usize,
}

impl CheckContext<'_> {
    fn mismatch<F: SourceFloat, I: DestInt>(
        &self,
        lane: usize,
        input: F,
        expected: I,
        actual: I,
    ) -> ConvalidarError {
        ConvalidarError::ConversionMismatch {
            pair: self.pair.to_string(),
            battery: self.battery,
            rep: self.rep,
            lane,
            input_bits: input.to_bits64(),
            expected: expected.to_u64_bits(),
            actual: actual.to_u64_bits(),
        }
    }
}

/// Scalar reference oracle: truncation toward zero.
#[must_use]
pub fn truncate_scalar<F: SourceFloat, I: DestInt>(input: F) -> I {
    I::truncate_from_f64(input.to_f64())
}

/// Every output lane must equal the exact truncation of its input lane.
///
/// # Errors
///
/// [`ConvalidarError::ConversionMismatch`] for the first differing lane.
pub fn check_exact<F: SourceFloat, I: DestInt>(
    ctx: &CheckContext<'_>,
    inputs: &[F],
    actual: &[I],
) -> Result<()> {
    debug_assert_eq!(inputs.len(), actual.len());

    for (lane, (&input, &got)) in inputs.iter().zip(actual.iter()).enumerate() {
        let expected = truncate_scalar::<F, I>(input);
        if got != expected {
            return Err(ctx.mismatch(lane, input, expected, got));
        }
    }
    Ok(())
}

/// Every output lane must be exactly `0` or exactly all-ones.
///
/// # Errors
///
/// [`ConvalidarError::OutOfRangeContract`] for the first lane holding any
/// other bit pattern.
pub fn check_relaxed<F: SourceFloat, I: DestInt>(
    ctx: &CheckContext<'_>,
    inputs: &[F],
    actual: &[I],
) -> Result<()> {
    debug_assert_eq!(inputs.len(), actual.len());

    let all_ones = I::all_ones_bits();
    for (lane, (&input, &got)) in inputs.iter().zip(actual.iter()).enumerate() {
        let bits = got.to_u64_bits();
        if bits != 0 && bits != all_ones {
            return Err(ConvalidarError::OutOfRangeContract {
                pair: ctx.pair.to_string(),
                battery: ctx.battery,
                rep: ctx.rep,
                lane,
                input_bits: input.to_bits64(),
                actual: bits,
            });
        }
    }
    Ok(())
}

/// Plant `special` in every other lane and verify the surviving lanes.
///
/// Runs two complementary conversions, one with `special` at even lane
/// positions and one with it at odd positions, then merges the valid lanes
/// by parity. The merged vector must equal the exact conversion of the
/// clean inputs, proving that a NaN or Infinity in one lane cannot corrupt
/// its neighbors.
///
/// # Errors
///
/// [`ConvalidarError::ConversionMismatch`] for the first corrupted lane.
pub fn check_interleaved<F: SourceFloat, I: DestInt>(
    ctx: &CheckContext<'_>,
    conv: &dyn FastConvert<F, I>,
    clean: &[F],
    special: F,
) -> Result<()> {
    let n = clean.len();

    let mut special_at_even = clean.to_vec();
    let mut special_at_odd = clean.to_vec();
    for i in 0..n {
        if i % 2 == 0 {
            special_at_even[i] = special;
        } else {
            special_at_odd[i] = special;
        }
    }

    let mut out_even = vec![I::from_u64_bits(0); n];
    let mut out_odd = vec![I::from_u64_bits(0); n];
    conv.fast_convert(&special_at_even, &mut out_even);
    conv.fast_convert(&special_at_odd, &mut out_odd);

    // Valid lanes: odd positions of the first conversion, even of the second
    let mut merged = vec![I::from_u64_bits(0); n];
    for i in 0..n {
        merged[i] = if i % 2 == 0 { out_odd[i] } else { out_even[i] };
    }

    check_exact(ctx, clean, &merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: CheckContext<'static> = CheckContext {
        pair: "f32->i32",
        battery: "unit",
        rep: 0,
    };

    #[test]
    fn test_check_exact_accepts_truncation() {
        let inputs = [0.0f32, 1.9, -1.9, 100.5];
        let outputs = [0i32, 1, -1, 100];
        assert!(check_exact(&CTX, &inputs, &outputs).is_ok());
    }

    #[test]
    fn test_check_exact_reports_lane_and_bits() {
        let inputs = [0.0f32, 2.5];
        let outputs = [0i32, 3]; // lane 1 rounded instead of truncated
        let err = check_exact(&CTX, &inputs, &outputs).unwrap_err();
        match err {
            ConvalidarError::ConversionMismatch {
                lane,
                input_bits,
                expected,
                actual,
                ..
            } => {
                assert_eq!(lane, 1);
                assert_eq!(input_bits, u64::from(2.5f32.to_bits()));
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("wrong error variant: {other:?}"),
        }
    }

    #[test]
    fn test_check_relaxed_accepts_both_patterns() {
        let inputs = [f32::INFINITY, f32::NEG_INFINITY];
        assert!(check_relaxed(&CTX, &inputs, &[0i32, -1i32]).is_ok());
        assert!(check_relaxed(&CTX, &inputs, &[-1i32, 0i32]).is_ok());
        assert!(check_relaxed(&CTX, &inputs, &[0i64, -1i64]).is_ok());
    }

    #[test]
    fn test_check_relaxed_rejects_mixed_patterns() {
        let inputs = [f32::NAN];
        // i32::MIN is what raw cvttps2dq would produce; the contract under
        // test is stricter than that instruction alone.
        let err = check_relaxed(&CTX, &inputs, &[i32::MIN]).unwrap_err();
        assert!(matches!(err, ConvalidarError::OutOfRangeContract { .. }));
        let err = check_relaxed(&CTX, &inputs, &[1i32]).unwrap_err();
        assert!(matches!(err, ConvalidarError::OutOfRangeContract { .. }));
    }
}
