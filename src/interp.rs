//! Pose interpolation between the two samples bracketing a query time.

use crate::error::InterpResult;
use crate::locate::{locate, Neighbors};
use crate::series::PoseSeries;
use crate::slerp::slerp;
use crate::types::{Pose, TimedPose};

/// Bracketing timestamps closer than this are treated as coincident and
/// resolved to the earlier sample instead of dividing by the gap.
const MIN_TIME_SPAN: f64 = 1e-9;

/// Blend two poses at `factor`, which is clamped to [0, 1].
///
/// Positions blend linearly; orientations blend spherically along the
/// shorter great-circle arc.
pub fn interpolate_pose(a: &Pose, b: &Pose, factor: f64) -> Pose {
    let t = factor.clamp(0.0, 1.0);
    Pose {
        position: a.position * (1.0 - t) + b.position * t,
        orientation: slerp(a.orientation, b.orientation, t),
    }
}

/// Pose at `target_time`, interpolated between the two nearest samples.
///
/// A query landing exactly on a sample timestamp returns that sample
/// unchanged. Locator failures (`EmptyTrajectory`, `OutOfRange`) propagate
/// as-is.
pub fn interpolate_at<S>(series: &S, target_time: f64) -> InterpResult<TimedPose>
where
    S: PoseSeries + ?Sized,
{
    match locate(series, target_time)? {
        Neighbors::Exact(idx) => Ok(series.sample(idx)),
        Neighbors::Bracket(lo, hi) => {
            let a = series.sample(lo);
            let b = series.sample(hi);

            let span = b.timestamp - a.timestamp;
            if span < MIN_TIME_SPAN {
                // Numerically coincident samples; the earlier one wins.
                return Ok(a);
            }

            let t = (target_time - a.timestamp) / span;
            Ok(TimedPose::new(
                target_time,
                interpolate_pose(&a.pose, &b.pose, t),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoseInterpError;
    use crate::types::TimeKey;
    use approx::assert_relative_eq;
    use nalgebra::{Quaternion, Vector3};
    use std::collections::BTreeMap;

    fn demo_series() -> Vec<TimedPose> {
        vec![
            TimedPose::new(
                0.0,
                Pose::new(Vector3::zeros(), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            ),
            TimedPose::new(
                2.0,
                Pose::new(
                    Vector3::new(2.0, 0.0, 0.0),
                    Quaternion::new(0.0, 0.0, 1.0, 0.0),
                ),
            ),
        ]
    }

    #[test]
    fn test_exact_match_is_bit_identical() {
        let samples = demo_series();
        for tp in &samples {
            let out = interpolate_at(&samples, tp.timestamp).unwrap();
            assert_eq!(out.pose, tp.pose);
            assert_eq!(out.timestamp, tp.timestamp);
        }
    }

    #[test]
    fn test_position_linearity() {
        let samples = demo_series();
        let out = interpolate_at(&samples, 0.5).unwrap();
        assert_eq!(out.pose.position, Vector3::new(0.5, 0.0, 0.0));

        let mid = interpolate_at(&samples, 1.0).unwrap();
        assert_eq!(mid.pose.position, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_orientation_midpoint_of_half_turn() {
        let samples = demo_series();
        let out = interpolate_at(&samples, 1.0).unwrap();
        let q = out.pose.orientation;
        let half_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(q.w, half_sqrt2, epsilon = 1e-4);
        assert_relative_eq!(q.i, 0.0, epsilon = 1e-9);
        assert_relative_eq!(q.j, half_sqrt2, epsilon = 1e-4);
        assert_relative_eq!(q.k, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_boundaries_never_out_of_range() {
        let samples = demo_series();
        assert!(interpolate_at(&samples, 0.0).is_ok());
        assert!(interpolate_at(&samples, 2.0).is_ok());
    }

    #[test]
    fn test_failures_propagate() {
        let empty: Vec<TimedPose> = Vec::new();
        assert_eq!(
            interpolate_at(&empty, 0.0).unwrap_err(),
            PoseInterpError::EmptyTrajectory
        );
        let samples = demo_series();
        assert!(matches!(
            interpolate_at(&samples, 2.5),
            Err(PoseInterpError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_factor_is_clamped() {
        let a = Pose::identity();
        let b = Pose::new(
            Vector3::new(1.0, 0.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
        );
        let below = interpolate_pose(&a, &b, -0.5);
        assert_eq!(below.position, Vector3::zeros());
        let above = interpolate_pose(&a, &b, 1.5);
        assert_eq!(above.position, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_degenerate_span_returns_earlier_sample() {
        let pose_a = Pose::new(
            Vector3::new(1.0, 1.0, 1.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
        );
        let pose_b = Pose::new(
            Vector3::new(9.0, 9.0, 9.0),
            Quaternion::new(0.0, 1.0, 0.0, 0.0),
        );
        let t0 = 1.0;
        let t1 = t0 + 1e-12;
        let samples = vec![TimedPose::new(t0, pose_a), TimedPose::new(t1, pose_b)];

        // Any query strictly inside the degenerate gap resolves to the
        // earlier sample rather than dividing by the near-zero span.
        let inside = (t0 + t1) / 2.0;
        if inside > t0 && inside < t1 {
            let out = interpolate_at(&samples, inside).unwrap();
            assert_eq!(out.pose, pose_a);
        }
    }

    #[test]
    fn test_slice_and_map_backings_agree() {
        let samples = vec![
            TimedPose::new(
                0.0,
                Pose::new(Vector3::zeros(), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            ),
            TimedPose::new(
                1.0,
                Pose::new(
                    Vector3::new(1.0, 0.0, 0.0),
                    Quaternion::new(0.7071, 0.0, 0.7071, 0.0),
                ),
            ),
            TimedPose::new(
                2.0,
                Pose::new(
                    Vector3::new(1.0, 1.0, 0.0),
                    Quaternion::new(0.0, 0.0, 1.0, 0.0),
                ),
            ),
        ];
        let map: BTreeMap<TimeKey, Pose> = samples
            .iter()
            .map(|tp| (TimeKey(tp.timestamp), tp.pose))
            .collect();

        for target in [0.0, 0.25, 1.0, 1.6, 2.0] {
            let from_slice = interpolate_at(&samples, target).unwrap();
            let from_map = interpolate_at(&map, target).unwrap();
            assert_eq!(from_slice.timestamp, from_map.timestamp);
            assert_eq!(from_slice.pose, from_map.pose);
        }
    }
}
