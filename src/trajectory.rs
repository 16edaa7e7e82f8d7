//! Owned trajectory container with order-validated construction.

use serde::{Deserialize, Serialize};

use crate::error::{InterpResult, PoseInterpError};
use crate::series::PoseSeries;
use crate::types::{Pose, TimedPose};

/// A trajectory of timestamped poses with strictly increasing timestamps.
///
/// Ordering is validated at construction and append so queries can rely on
/// it without re-checking. Views over caller-owned storage (slices, maps)
/// skip this validation by design.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<TimedPose>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Build from pre-ordered samples, rejecting the first out-of-order
    /// timestamp.
    pub fn from_samples(samples: Vec<TimedPose>) -> InterpResult<Self> {
        for idx in 1..samples.len() {
            if samples[idx].timestamp <= samples[idx - 1].timestamp {
                return Err(PoseInterpError::NonMonotonic { index: idx });
            }
        }
        Ok(Self { samples })
    }

    /// Append a pose; the timestamp must be greater than the current last.
    pub fn push(&mut self, timestamp: f64, pose: Pose) -> InterpResult<()> {
        if let Some(last) = self.samples.last() {
            if timestamp <= last.timestamp {
                return Err(PoseInterpError::NonMonotonic {
                    index: self.samples.len(),
                });
            }
        }
        self.samples.push(TimedPose::new(timestamp, pose));
        Ok(())
    }

    pub fn samples(&self) -> &[TimedPose] {
        &self.samples
    }

    pub fn first(&self) -> Option<&TimedPose> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TimedPose> {
        self.samples.last()
    }

    /// Covered time range as (first, last), or `None` when empty.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

impl PoseSeries for Trajectory {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn sample(&self, idx: usize) -> TimedPose {
        self.samples[idx]
    }

    fn timestamp(&self, idx: usize) -> f64 {
        self.samples[idx].timestamp
    }

    fn lower_bound(&self, target: f64) -> usize {
        self.samples.partition_point(|tp| tp.timestamp < target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples_accepts_increasing() {
        let samples: Vec<TimedPose> = [0.0, 0.5, 2.0]
            .iter()
            .map(|&t| TimedPose::new(t, Pose::identity()))
            .collect();
        let trajectory = Trajectory::from_samples(samples).unwrap();
        assert_eq!(PoseSeries::len(&trajectory), 3);
        assert_eq!(trajectory.time_range(), Some((0.0, 2.0)));
    }

    #[test]
    fn test_from_samples_rejects_out_of_order() {
        let samples = vec![
            TimedPose::new(0.0, Pose::identity()),
            TimedPose::new(2.0, Pose::identity()),
            TimedPose::new(1.0, Pose::identity()),
        ];
        assert_eq!(
            Trajectory::from_samples(samples).unwrap_err(),
            PoseInterpError::NonMonotonic { index: 2 }
        );
    }

    #[test]
    fn test_push_rejects_stale_timestamp() {
        let mut trajectory = Trajectory::new();
        trajectory.push(1.0, Pose::identity()).unwrap();
        assert_eq!(
            trajectory.push(1.0, Pose::identity()).unwrap_err(),
            PoseInterpError::NonMonotonic { index: 1 }
        );
        trajectory.push(1.5, Pose::identity()).unwrap();
        assert_eq!(trajectory.last().unwrap().timestamp, 1.5);
    }
}
