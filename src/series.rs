//! Backing-storage abstraction for timestamped pose series.
//!
//! The interpolation engine only needs ordered traversal plus a timestamp
//! projection per element, so it is written against the [`PoseSeries`]
//! trait instead of a concrete container. Contiguous storage gets a
//! logarithmic neighbor search; keyed storage falls back to a sequential
//! scan with identical bracketing semantics.

use std::collections::BTreeMap;

use crate::types::{Pose, TimeKey, TimedPose};

/// Read-only view over an ordered series of timestamped poses.
///
/// Timestamps must be non-decreasing in position order; queries assume this
/// and do not re-validate it.
pub trait PoseSeries {
    /// Number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at time-order position `idx`. Panics when out of bounds.
    fn sample(&self, idx: usize) -> TimedPose;

    /// Timestamp at position `idx`. Override when cheaper than `sample`.
    fn timestamp(&self, idx: usize) -> f64 {
        self.sample(idx).timestamp
    }

    /// First position whose timestamp is not less than `target`, or `len()`
    /// when every timestamp is smaller.
    ///
    /// The default walks the series front to back; random-access backings
    /// override this with a binary search.
    fn lower_bound(&self, target: f64) -> usize {
        (0..self.len())
            .find(|&idx| self.timestamp(idx) >= target)
            .unwrap_or_else(|| self.len())
    }
}

impl PoseSeries for [TimedPose] {
    fn len(&self) -> usize {
        <[TimedPose]>::len(self)
    }

    fn sample(&self, idx: usize) -> TimedPose {
        self[idx]
    }

    fn timestamp(&self, idx: usize) -> f64 {
        self[idx].timestamp
    }

    fn lower_bound(&self, target: f64) -> usize {
        self.partition_point(|tp| tp.timestamp < target)
    }
}

impl PoseSeries for Vec<TimedPose> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn sample(&self, idx: usize) -> TimedPose {
        self[idx]
    }

    fn timestamp(&self, idx: usize) -> f64 {
        self[idx].timestamp
    }

    fn lower_bound(&self, target: f64) -> usize {
        self.as_slice().partition_point(|tp| tp.timestamp < target)
    }
}

/// Keyed backing: the map key is the timestamp, iteration order is time
/// order. Positional access walks the tree, so queries are linear here.
impl PoseSeries for BTreeMap<TimeKey, Pose> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn sample(&self, idx: usize) -> TimedPose {
        let (key, pose) = self.iter().nth(idx).expect("sample position out of bounds");
        TimedPose::new(key.0, *pose)
    }

    fn timestamp(&self, idx: usize) -> f64 {
        self.keys().nth(idx).expect("sample position out of bounds").0
    }

    fn lower_bound(&self, target: f64) -> usize {
        self.keys()
            .position(|key| key.0 >= target)
            .unwrap_or_else(|| self.len())
    }
}
