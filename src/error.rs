//! Error types for conversion-conformance runs.
//!
//! Two error classes exist and both are terminal for a run:
//!
//! 1. **Harness-construction errors** ([`ConvalidarError::InvariantViolation`]):
//!    a computed boundary or derived constant violates its own invariant.
//!    These indicate a defect in the harness itself, not in the backend
//!    under test.
//! 2. **Conformance failures** ([`ConvalidarError::ConversionMismatch`],
//!    [`ConvalidarError::OutOfRangeContract`]): an observed conversion result
//!    disagrees with the expected value or the relaxed out-of-range
//!    invariant. These carry the type pair, battery, repetition, lane index,
//!    and raw bit patterns so a failing input can be reproduced exactly.

use thiserror::Error;

/// Error type for all conformance-harness operations
#[derive(Debug, Error)]
pub enum ConvalidarError {
    /// A harness-construction invariant was violated.
    ///
    /// Signals a defect in the boundary computation or sampler derivation,
    /// never in the conversion backend under test.
    #[error("harness invariant violated: {condition}: {detail}")]
    InvariantViolation {
        /// The condition that failed, as written in the harness
        condition: &'static str,
        /// Values involved in the violation
        detail: String,
    },

    /// An in-range input converted to something other than its exact
    /// truncation toward zero.
    #[error(
        "{pair} [{battery}] rep {rep}: lane {lane} input bits {input_bits:#x}: \
         expected {expected:#x}, got {actual:#x}"
    )]
    ConversionMismatch {
        /// Source and destination type names, e.g. `f32->i32`
        pair: String,
        /// Battery that produced the input
        battery: &'static str,
        /// Repetition index within the battery
        rep: usize,
        /// Lane index of the first mismatch
        lane: usize,
        /// Raw bit pattern of the source lane
        input_bits: u64,
        /// Expected destination bits (exact truncation)
        expected: u64,
        /// Observed destination bits
        actual: u64,
    },

    /// An out-of-range, NaN, or Infinity input converted to something other
    /// than all-zeros or all-ones at the destination width.
    #[error(
        "{pair} [{battery}] rep {rep}: lane {lane} input bits {input_bits:#x}: \
         result {actual:#x} is neither 0 nor all ones"
    )]
    OutOfRangeContract {
        /// Source and destination type names
        pair: String,
        /// Battery that produced the input
        battery: &'static str,
        /// Repetition index within the battery
        rep: usize,
        /// Lane index of the violation
        lane: usize,
        /// Raw bit pattern of the source lane
        input_bits: u64,
        /// Observed destination bits
        actual: u64,
    },
}

/// Result type alias for conformance-harness operations
pub type Result<T> = std::result::Result<T, ConvalidarError>;

/// Check a harness-construction invariant, failing fast with context.
pub(crate) fn ensure<D: FnOnce() -> String>(
    ok: bool,
    condition: &'static str,
    detail: D,
) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(ConvalidarError::InvariantViolation {
            condition,
            detail: detail(),
        })
    }
}
