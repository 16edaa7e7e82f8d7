//! Core pose data types.

use nalgebra::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 6-DoF pose: 3D position plus orientation quaternion.
///
/// The orientation is expected to be unit norm whenever it represents a
/// rotation; interpolation keeps it that way.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: Quaternion<f64>,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: Quaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Zero position, identity rotation.
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: Quaternion::identity(),
        }
    }
}

/// A pose with an associated timestamp in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedPose {
    pub timestamp: f64,
    pub pose: Pose,
}

impl TimedPose {
    pub fn new(timestamp: f64, pose: Pose) -> Self {
        Self { timestamp, pose }
    }
}

/// Timestamp key with a total order, so poses can live in ordered maps
/// keyed by time.
///
/// Ordering follows `f64::total_cmp`; NaN sorts after every real value
/// instead of poisoning comparisons.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimeKey(pub f64);

impl From<f64> for TimeKey {
    fn from(seconds: f64) -> Self {
        TimeKey(seconds)
    }
}

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_key_ordering() {
        let mut keys = vec![TimeKey(2.0), TimeKey(0.5), TimeKey(1.0)];
        keys.sort();
        assert_eq!(keys[0], TimeKey(0.5));
        assert_eq!(keys[2], TimeKey(2.0));
    }

    #[test]
    fn test_identity_pose() {
        let pose = Pose::identity();
        assert_eq!(pose.position, Vector3::zeros());
        assert_eq!(pose.orientation.w, 1.0);
        assert_eq!(pose.orientation.i, 0.0);
    }
}
