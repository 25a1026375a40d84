//! Scalar numeric helpers shared by the forward and backward passes.

use crate::error::NetError;

/// The logistic sigmoid, `1 / (1 + e^-x)`.
///
/// Saturates cleanly to 0.0 / 1.0 for large |x| (e.g. |x| ~ 100) instead of
/// overflowing or producing NaN.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Product-sum of two equal-length slices.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, NetError> {
    if a.len() != b.len() {
        return Err(NetError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}
