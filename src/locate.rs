//! Neighbor search over a timestamped pose series.

use crate::error::{InterpResult, PoseInterpError};
use crate::series::PoseSeries;

/// Where a query time landed within a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbors {
    /// The timestamp at this position equals the query time exactly.
    Exact(usize),
    /// The query time falls strictly between these adjacent positions.
    Bracket(usize, usize),
}

/// Find the pair of samples bracketing `target_time`, or the exact hit.
///
/// Equality with the first or last timestamp counts as a hit; anything
/// strictly outside the recorded range is rejected rather than
/// extrapolated. With equal timestamps in the series, the first exact
/// match wins.
pub fn locate<S>(series: &S, target_time: f64) -> InterpResult<Neighbors>
where
    S: PoseSeries + ?Sized,
{
    if series.is_empty() {
        return Err(PoseInterpError::EmptyTrajectory);
    }

    let first = series.timestamp(0);
    let last = series.timestamp(series.len() - 1);
    if target_time < first || target_time > last {
        return Err(PoseInterpError::OutOfRange {
            target: target_time,
            first,
            last,
        });
    }

    // The range check guarantees a hit: target <= last, so some position
    // holds a timestamp >= target.
    let found = series.lower_bound(target_time);
    if series.timestamp(found) == target_time {
        return Ok(Neighbors::Exact(found));
    }

    // timestamp(found) > target >= first, so found > 0 and the predecessor
    // is strictly smaller than the target.
    Ok(Neighbors::Bracket(found - 1, found))
}
