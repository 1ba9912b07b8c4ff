//! Sign resolution for unoriented normals.
//!
//! Eigenvector and jet normals carry no intrinsic sign. An [`OrientationRule`]
//! picks one per query point. When a [`SurfaceEstimate`] is flipped its
//! curvatures are flipped in the same call, because curvature sign is defined
//! relative to the normal.

use crate::types::SurfaceEstimate;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Global reference used to choose each normal's sign.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "reference")]
pub enum OrientationRule {
    /// `dot(n, d) ≥ 0`.
    TowardDirection(Vector3<f64>),
    /// `dot(n, p − r) ≥ 0`: away from an interior point such as an object centre.
    AwayFromPoint(Point3<f64>),
    /// `dot(n, v − p) ≥ 0`: toward a sensor viewpoint.
    TowardPoint(Point3<f64>),
}

impl OrientationRule {
    /// Reference direction the normal at `query` should agree with.
    fn reference_at(&self, query: &Point3<f64>) -> Vector3<f64> {
        match self {
            OrientationRule::TowardDirection(d) => *d,
            OrientationRule::AwayFromPoint(r) => query - r,
            OrientationRule::TowardPoint(v) => v - query,
        }
    }
}

/// `-1.0` if `normal` disagrees with the rule at `query`, else `1.0`.
///
/// A zero dot product keeps the current sign so the result is deterministic.
pub fn orientation_sign(normal: &Vector3<f64>, query: &Point3<f64>, rule: &OrientationRule) -> f64 {
    if normal.dot(&rule.reference_at(query)) < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Orients one estimate in place, flipping normal and curvature together.
/// Returns whether a flip happened.
pub fn orient_estimate(estimate: &mut SurfaceEstimate, rule: &OrientationRule) -> bool {
    let flip = orientation_sign(&estimate.normal, &estimate.query, rule) < 0.0;
    if flip {
        estimate.normal = -estimate.normal;
        estimate.curvature = estimate.curvature.flipped();
    }
    estimate.oriented = true;
    flip
}

/// Orients every estimate; returns the number of flips.
pub fn orient_all(estimates: &mut [SurfaceEstimate], rule: &OrientationRule) -> usize {
    estimates
        .iter_mut()
        .map(|e| orient_estimate(e, rule))
        .filter(|&flipped| flipped)
        .count()
}

/// Orients bare normals paired with their query points; returns the number of flips.
///
/// Only for normals with no attached curvature; use [`orient_estimate`] otherwise.
/// `normals` and `queries` must have the same length.
pub fn orient_normals(
    normals: &mut [Vector3<f64>],
    queries: &[Point3<f64>],
    rule: &OrientationRule,
) -> usize {
    debug_assert_eq!(normals.len(), queries.len(), "one query point per normal");
    let mut flips = 0;
    for (n, q) in normals.iter_mut().zip(queries) {
        if orientation_sign(n, q, rule) < 0.0 {
            *n = -*n;
            flips += 1;
        }
    }
    flips
}
