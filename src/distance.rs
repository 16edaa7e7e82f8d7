//! Euclidean distance between n-dimensional points.

use crate::error::{InterpResult, PoseInterpError};

/// Euclidean distance between two points of the same dimension.
///
/// The dimension is the slice length; mismatched lengths are an error and
/// two zero-dimensional points are at distance 0.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> InterpResult<f64> {
    if a.len() != b.len() {
        return Err(PoseInterpError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let sum_sq: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum();

    Ok(sum_sq.sqrt())
}
