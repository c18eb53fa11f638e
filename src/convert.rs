//! Interface consumed from the conversion backend under test.
//!
//! The harness never implements conversion instructions itself; it drives a
//! backend through [`FastConvert`] and validates the results. A backend is
//! typically a thin wrapper over hardware SIMD intrinsics, with one lane
//! configuration per supported instruction-set target. The harness is
//! target-agnostic: it behaves identically whichever target the provider
//! hands it.

use crate::types::{DestInt, SourceFloat};

/// A "fast" float-to-int conversion primitive over fixed-width lane vectors.
///
/// The contract being validated:
///
/// - For in-range inputs the output lane equals the exact truncation toward
///   zero of the input lane.
/// - For NaN, Infinity, and finite-but-out-of-range inputs the output lane
///   is either all-zeros or all-ones at the destination width; which of the
///   two is unspecified and may vary per input.
///
/// Lane vectors are passed as slices of `lanes()` elements (`lanes() / 2`
/// for the half-width selection outputs). Implementations may assume the
/// slice lengths match the declared lane configuration.
pub trait FastConvert<F: SourceFloat, I: DestInt> {
    /// Lane count of a full source vector for this target.
    fn lanes(&self) -> usize;

    /// Convert every lane of `src` into `dst` (same-width, widening, or
    /// narrowing storage; lane count is preserved).
    fn fast_convert(&self, src: &[F], dst: &mut [I]);

    /// True when the half-width selection conversions are available.
    ///
    /// The four `fast_promote_*` methods are invoked only when this
    /// returns true; the defaults leave `dst` untouched.
    fn half_width_supported(&self) -> bool {
        false
    }

    /// Convert the lower half of `src`: `dst[i] = convert(src[i])`.
    fn fast_promote_lower(&self, _src: &[F], _dst: &mut [I]) {}

    /// Convert the upper half of `src`: `dst[i] = convert(src[i + N/2])`.
    fn fast_promote_upper(&self, _src: &[F], _dst: &mut [I]) {}

    /// Convert the even lanes of `src`: `dst[i] = convert(src[2i])`.
    fn fast_promote_even(&self, _src: &[F], _dst: &mut [I]) {}

    /// Convert the odd lanes of `src`: `dst[i] = convert(src[2i + 1])`.
    fn fast_promote_odd(&self, _src: &[F], _dst: &mut [I]) {}
}

/// Supplies the converter under test for each (source, destination) pair.
///
/// Returning `None` marks a pair as unsupported on the current target
/// (no f16 lanes, no 64-bit integer lanes, and so on); the orchestrator
/// records it as skipped instead of failing.
pub trait ConversionProvider {
    /// The converter for the `F` to `I` conversion, if supported.
    fn converter<F: SourceFloat, I: DestInt>(&self) -> Option<&dyn FastConvert<F, I>>;
}
