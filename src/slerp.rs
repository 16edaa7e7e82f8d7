//! Quaternion blending primitives.

use nalgebra::Quaternion;

/// Dot-product threshold above which two orientations are treated as nearly
/// parallel and spherical interpolation degrades to a normalized linear blend.
pub const NEARLY_PARALLEL_DOT: f64 = 0.9995;

/// Norm below which a quaternion cannot be meaningfully normalized.
const NORM_EPS: f64 = 1e-10;

/// Normalize `q`, falling back to the identity quaternion when the norm is
/// too small to divide by.
pub fn normalize_or_identity(q: Quaternion<f64>) -> Quaternion<f64> {
    let norm = q.coords.norm();
    if norm > NORM_EPS {
        Quaternion::from(q.coords / norm)
    } else {
        Quaternion::identity()
    }
}

/// Spherical linear interpolation from `a` to `b` at fraction `t`.
///
/// `b` is negated when the quaternions point into opposite half-spaces, so
/// the blend always walks the shorter of the two great-circle arcs (q and -q
/// encode the same rotation). Nearly parallel inputs fall back to a
/// normalized linear blend; the spherical branch is unit norm by
/// construction and is not re-normalized.
pub fn slerp(a: Quaternion<f64>, b: Quaternion<f64>, t: f64) -> Quaternion<f64> {
    let mut dot = a.coords.dot(&b.coords);
    let mut end = b.coords;

    if dot < 0.0 {
        end = -end;
        dot = -dot;
    }

    if dot > NEARLY_PARALLEL_DOT {
        // sin(angle) is too small to divide by in this regime.
        return normalize_or_identity(Quaternion::from(a.coords.lerp(&end, t)));
    }

    let angle = dot.acos();
    let sin_angle = angle.sin();
    let weight_a = ((1.0 - t) * angle).sin() / sin_angle;
    let weight_b = (t * angle).sin() / sin_angle;

    Quaternion::from(a.coords * weight_a + end * weight_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit(w: f64, x: f64, y: f64, z: f64) -> Quaternion<f64> {
        normalize_or_identity(Quaternion::new(w, x, y, z))
    }

    #[test]
    fn test_endpoints() {
        let a = unit(1.0, 0.0, 0.0, 0.0);
        let b = unit(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(slerp(a, b, 0.0).w, a.w, epsilon = 1e-12);
        assert_relative_eq!(slerp(a, b, 1.0).j, b.j, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint_of_half_turn() {
        // 180 degree arc on the w/y great circle.
        let a = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let b = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let mid = slerp(a, b, 0.5);
        let half_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(mid.w, half_sqrt2, epsilon = 1e-9);
        assert_relative_eq!(mid.i, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mid.j, half_sqrt2, epsilon = 1e-9);
        assert_relative_eq!(mid.k, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_output_stays_unit_norm() {
        let a = unit(0.9, 0.1, -0.3, 0.2);
        let b = unit(-0.2, 0.8, 0.4, -0.1);
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let out = slerp(a, b, t);
            assert_relative_eq!(out.coords.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_opposite_signs_take_zero_length_path() {
        // q and -q are the same rotation, so the path between them must not
        // be a half-turn detour.
        let q = unit(0.5, 0.5, 0.5, 0.5);
        let neg = Quaternion::from(-q.coords);
        for t in [0.25, 0.5, 0.75] {
            let out = slerp(q, neg, t);
            let agreement = out.coords.dot(&q.coords).abs();
            assert_relative_eq!(agreement, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_nearly_parallel_falls_back_to_lerp() {
        let a = unit(1.0, 0.0, 0.0, 0.0);
        let b = unit(1.0, 1e-4, 0.0, 0.0);
        let out = slerp(a, b, 0.5);
        assert_relative_eq!(out.coords.norm(), 1.0, epsilon = 1e-9);
        assert!(out.w > 0.999);
    }

    #[test]
    fn test_normalize_zero_falls_back_to_identity() {
        let q = normalize_or_identity(Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(q.w, 1.0);
        assert_eq!(q.i, 0.0);
        assert_eq!(q.j, 0.0);
        assert_eq!(q.k, 0.0);
    }
}
