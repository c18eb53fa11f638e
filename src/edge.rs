//! Canonical special values per source type.
//!
//! Every value here is assembled directly from the type descriptor's field
//! masks rather than by arithmetic, so the exact encodings are guaranteed
//! regardless of host arithmetic semantics (NaN propagation, signed-zero
//! handling, and so on).

use crate::bounds::ConversionBounds;
use crate::types::SourceFloat;

/// Broadcast-ready special values for one (source, destination) pair.
#[derive(Debug, Clone, Copy)]
pub struct EdgeCases<F: SourceFloat> {
    /// Positive zero
    pub zero: F,
    /// Exactly 1
    pub one: F,
    /// Exactly -1 (exercised for signed destinations only)
    pub neg_one: F,
    /// Smallest in-range value
    pub lowest: F,
    /// Largest in-range value
    pub highest: F,
    /// Positive Infinity: exponent all ones, mantissa zero, sign clear
    pub pos_inf: F,
    /// Negative Infinity: exponent all ones, mantissa zero, sign set
    pub neg_inf: F,
    /// Quiet-pattern NaN with sign clear: exponent and mantissa all ones
    pub pos_nan: F,
    /// Quiet-pattern NaN with sign set: every storage bit set
    pub neg_nan: F,
}

impl<F: SourceFloat> EdgeCases<F> {
    /// Assemble the special values for a pair whose bounds are `bounds`.
    #[must_use]
    pub fn new(bounds: &ConversionBounds<F>) -> Self {
        let exp = F::exponent_mask64();
        let mant = F::mantissa_mask64();
        let sign = F::sign_mask64();

        // 1.0 encodes as the bias in the exponent field with a zero mantissa
        let one_bits = (F::max_biased_exponent() >> 1) << F::MANTISSA_BITS;

        Self {
            zero: F::from_bits64(0),
            one: F::from_bits64(one_bits),
            neg_one: F::from_bits64(one_bits | sign),
            lowest: bounds.lowest,
            highest: bounds.highest,
            pos_inf: F::from_bits64(exp),
            neg_inf: F::from_bits64(exp | sign),
            pos_nan: F::from_bits64(exp | mant),
            neg_nan: F::from_bits64(exp | mant | sign),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    fn edges_f32_i32() -> EdgeCases<f32> {
        let bounds = ConversionBounds::<f32>::compute::<i32>().unwrap();
        EdgeCases::new(&bounds)
    }

    #[test]
    fn test_exact_values() {
        let e = edges_f32_i32();
        assert_eq!(e.zero, 0.0);
        assert_eq!(e.one, 1.0);
        assert_eq!(e.neg_one, -1.0);
        assert!(e.zero.is_sign_positive());
    }

    #[test]
    fn test_special_encodings_f32() {
        let e = edges_f32_i32();
        assert_eq!(e.pos_inf, f32::INFINITY);
        assert_eq!(e.neg_inf, f32::NEG_INFINITY);
        assert!(e.pos_nan.is_nan());
        assert_eq!(e.pos_nan.to_bits(), 0x7FFF_FFFF);
        assert!(e.neg_nan.is_nan());
        assert_eq!(e.neg_nan.to_bits(), u32::MAX);
    }

    #[test]
    fn test_special_encodings_f16() {
        let bounds = ConversionBounds::<f16>::compute::<i16>().unwrap();
        let e = EdgeCases::new(&bounds);
        assert_eq!(e.one, f16::from_f32(1.0));
        assert_eq!(e.pos_inf.to_bits(), 0x7C00);
        assert_eq!(e.neg_inf.to_bits(), 0xFC00);
        assert_eq!(e.pos_nan.to_bits(), 0x7FFF);
        assert_eq!(e.neg_nan.to_bits(), 0xFFFF);
    }

    #[test]
    fn test_special_encodings_f64() {
        let bounds = ConversionBounds::<f64>::compute::<i64>().unwrap();
        let e = EdgeCases::new(&bounds);
        assert_eq!(e.pos_inf, f64::INFINITY);
        assert_eq!(e.neg_nan.to_bits(), u64::MAX);
        assert_eq!(e.one, 1.0f64);
    }
}
