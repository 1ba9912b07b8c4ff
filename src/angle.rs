//! Angle utilities for comparing normals and principal directions.

use nalgebra::Vector3;

const EPS: f64 = 1e-12;

/// Computes the unsigned angle between two 3D vectors in radians.
/// Returns a value in [0, π]. Zero if the vectors are parallel
/// and pointing in the same direction; π if they are opposite.
#[inline]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let na = a.norm().max(EPS);
    let nb = b.norm().max(EPS);
    (a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos()
}

/// Computes the angle between two 3D vectors while treating antipodal
/// directions as equivalent. Returns a value in [0, π/2].
///
/// Unoriented normals and principal directions carry no intrinsic sign, so
/// this is the comparison to use before orientation has been resolved.
#[inline]
pub fn angle_between_dirless(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let na = a.norm().max(EPS);
    let nb = b.norm().max(EPS);
    (a.dot(b) / (na * nb)).abs().clamp(0.0, 1.0).acos()
}

/// Normalizes `v`, returning `None` when its length is below `EPS`.
#[inline]
pub fn try_normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let n = v.norm();
    if !n.is_finite() || n <= EPS {
        None
    } else {
        Some(v / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn angle_between_basic() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        assert!(approx_eq(angle_between(&a, &a), 0.0));
        assert!(approx_eq(angle_between(&a, &-a), std::f64::consts::PI));
        assert!(approx_eq(
            angle_between(&a, &Vector3::new(0.0, 0.0, 2.0)),
            std::f64::consts::FRAC_PI_2
        ));
    }

    #[test]
    fn dirless_treats_antipodes_as_equal() {
        let a = Vector3::new(0.3, -0.2, 0.9);
        assert!(approx_eq(angle_between_dirless(&a, &-a), 0.0));
        assert!(angle_between_dirless(&a, &Vector3::x()) <= std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn try_normalize_rejects_zero() {
        assert!(try_normalize(&Vector3::zeros()).is_none());
        let v = try_normalize(&Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert!(approx_eq(v.y, 0.6));
    }
}
