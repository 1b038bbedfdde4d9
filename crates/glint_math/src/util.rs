//! Scalar helpers for numerically stable comparisons.

/// Magnitudes below this threshold are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snap `x` to exactly zero when it is within [`EPSILON`] of zero.
///
/// Used before sign tests so that near-tangent and near-parallel cases fall on
/// the "no intersection" side instead of flickering between signs.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
