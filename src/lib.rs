//! # Convalidar
//!
//! Convalidar (Spanish: "to validate") is a conformance harness for "fast"
//! float-to-integer conversion primitives operating on fixed-width lane
//! vectors.
//!
//! Fast conversions trade fully defined IEEE overflow behavior for speed:
//! they guarantee exact truncation toward zero for in-range inputs, and for
//! NaN, Infinity, or overflowing inputs they guarantee only that the result
//! is one of two bit patterns (all-zeros or all-ones), never an arbitrary
//! value. Validating that contract requires boundary constants computed
//! with exact arithmetic and no double rounding, because the integer limits
//! usually sit between representable source floats.
//!
//! ## What the harness does
//!
//! - Computes, per (source float, destination integer) pair, the precise
//!   inclusive range of source values that convert safely
//!   ([`ConversionBounds`]).
//! - Generates canonical edge values and two randomized input families:
//!   uniformly distributed in-range bit patterns and
//!   finite-but-overflowing/Inf/NaN patterns ([`sampler`]).
//! - Drives the external conversion backend through the [`FastConvert`]
//!   trait and validates every output lane ([`checker`]), reporting the
//!   first failing lane with full reproduction context.
//!
//! ## Example
//!
//! ```rust
//! use convalidar::mock::MockSimd;
//! use convalidar::{run_all, HarnessConfig};
//!
//! let config = HarnessConfig {
//!     reps: 8,
//!     ..HarnessConfig::default()
//! };
//! let report = run_all(&MockSimd::new(8), &config).expect("mock backend conforms");
//! assert_eq!(report.pairs.len(), 12);
//! assert!(report.skipped.is_empty());
//! ```
//!
//! ## Scope
//!
//! The conversion primitives themselves, multi-target dispatch, and aligned
//! buffer allocation belong to the backend under test; this crate consumes
//! them through [`FastConvert`] and [`ConversionProvider`] and stays
//! target-agnostic.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)] // bit-pattern work narrows u64 on purpose
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)] // exact bit-level comparisons are the point
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

/// Extended-precision arithmetic for boundary constants
pub mod arith;
/// Per-pair in-range boundary computation
pub mod bounds;
/// Lane-level conversion invariant checks
pub mod checker;
/// Traits consumed from the conversion backend under test
pub mod convert;
/// Canonical special values per source type
pub mod edge;
/// Error types for conformance runs
pub mod error;
/// Conforming scalar mock backend for harness self-tests
pub mod mock;
/// Matrix iteration and battery sequencing
pub mod orchestrator;
/// Deterministic random input generation
pub mod sampler;
/// Type descriptors for source floats and destination integers
pub mod types;

pub use bounds::ConversionBounds;
pub use convert::{ConversionProvider, FastConvert};
pub use error::{ConvalidarError, Result};
pub use orchestrator::{run_all, HarnessConfig, PairReport, RunReport};
