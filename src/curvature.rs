//! Normal and principal curvatures of a fitted jet at the frame origin.
//!
//! The jet is read as a Monge patch `z = f(x, y)` over the local frame. At the
//! origin the first and second fundamental forms are
//!
//! ```text
//! E = 1 + f_x²   F = f_x f_y   G = 1 + f_y²
//! L = f_xx / W   M = f_xy / W   N = f_yy / W      W = √(1 + f_x² + f_y²)
//! ```
//!
//! and the principal curvatures are the eigenvalues of the shape operator
//! `S = I⁻¹ II`, i.e. `H ± √(H² − K)`. Curvatures are signed relative to the
//! patch normal `(−f_x, −f_y, 1) / W`, which lies on the same side as the
//! frame's provisional normal. Flipping the normal flips their sign, see
//! [`PrincipalCurvatures::flipped`].

use crate::angle::try_normalize;
use crate::frame::LocalFrame;
use crate::jet::JetCoefficients;
use nalgebra::{Vector2, Vector3};
use serde::Serialize;

/// √(H² − K) below this fraction of max(|k|) counts as an umbilic point.
const UMBILIC_REL: f64 = 1e-9;
const EPS: f64 = 1e-12;

/// Principal curvatures `k1 ≥ k2` and their unit directions.
///
/// `directions` is `None` for plane fits, where curvature is zero by
/// construction and no direction is preferred. Otherwise `[d1, d2]` are
/// orthonormal, tangent to the surface, and `d1 × d2` equals the normal the
/// curvatures are measured against.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrincipalCurvatures {
    pub k1: f64,
    pub k2: f64,
    pub directions: Option<[Vector3<f64>; 2]>,
}

impl PrincipalCurvatures {
    /// Result for an order-1 fit.
    pub fn planar() -> Self {
        Self {
            k1: 0.0,
            k2: 0.0,
            directions: None,
        }
    }

    pub fn mean(&self) -> f64 {
        0.5 * (self.k1 + self.k2)
    }

    pub fn gaussian(&self) -> f64 {
        self.k1 * self.k2
    }

    pub fn is_umbilic(&self, tol: f64) -> bool {
        (self.k1 - self.k2).abs() <= tol
    }

    /// Curvatures relative to the opposite normal.
    ///
    /// Negation swaps the ordering, so `k1' = −k2` and `k2' = −k1`; the
    /// directions swap with them, which keeps `d1' × d2' = −n`.
    pub fn flipped(&self) -> Self {
        Self {
            k1: -self.k2,
            k2: -self.k1,
            directions: self.directions.map(|[d1, d2]| [d2, d1]),
        }
    }
}

/// Unit normal of the fitted patch at the origin, in ambient coordinates.
pub fn monge_normal(jet: &JetCoefficients, frame: &LocalFrame) -> Vector3<f64> {
    let (fx, fy) = jet.gradient_at_origin();
    let local = Vector3::new(-fx, -fy, 1.0).normalize();
    frame.to_ambient_dir(&local).normalize()
}

/// Principal curvatures and directions of `jet` at the origin of `frame`.
///
/// Curvatures are divided by `frame.scale` so they are in inverse ambient
/// length units. Plane fits short-circuit to [`PrincipalCurvatures::planar`].
pub fn principal_curvatures(jet: &JetCoefficients, frame: &LocalFrame) -> PrincipalCurvatures {
    if !jet.has_curvature() {
        return PrincipalCurvatures::planar();
    }

    let (fx, fy) = jet.gradient_at_origin();
    let (fxx, fxy, fyy) = jet.hessian_at_origin();

    let e = 1.0 + fx * fx;
    let f = fx * fy;
    let g = 1.0 + fy * fy;
    let det_i = e * g - f * f;
    let w = det_i.sqrt();
    let l = fxx / w;
    let m = fxy / w;
    let n = fyy / w;

    let h = (e * n - 2.0 * f * m + g * l) / (2.0 * det_i);
    let k = (l * n - m * m) / det_i;
    let root = (h * h - k).max(0.0).sqrt();
    let k1 = h + root;
    let k2 = h - root;

    let normal = monge_normal(jet, frame);
    let umbilic = root <= UMBILIC_REL * k1.abs().max(k2.abs()) || root <= EPS;
    let uv = if umbilic {
        None
    } else {
        shape_operator_eigenvector(e, f, g, l, m, n, k1)
    };
    let uv = uv.unwrap_or_else(|| Vector2::new(1.0, 0.0));

    // Parameter direction (u, v) lifts to u·r_x + v·r_y with r_x = (1, 0, f_x).
    let tangent = Vector3::new(uv.x, uv.y, uv.x * fx + uv.y * fy);
    let d1 = try_normalize(&frame.to_ambient_dir(&tangent)).unwrap_or(frame.tangent1);
    // Project out any residual normal component before completing the basis.
    let d1 = try_normalize(&(d1 - normal * normal.dot(&d1))).unwrap_or(frame.tangent1);
    let d2 = normal.cross(&d1);

    PrincipalCurvatures {
        k1: k1 / frame.scale,
        k2: k2 / frame.scale,
        directions: Some([d1, d2]),
    }
}

/// Null vector of `II − κ I` in parameter coordinates.
fn shape_operator_eigenvector(
    e: f64,
    f: f64,
    g: f64,
    l: f64,
    m: f64,
    n: f64,
    kappa: f64,
) -> Option<Vector2<f64>> {
    let a = l - kappa * e;
    let b = m - kappa * f;
    let c = n - kappa * g;
    // Each row of the singular 2×2 gives a candidate; keep the better conditioned.
    let from_row1 = Vector2::new(-b, a);
    let from_row2 = Vector2::new(c, -b);
    let best = if from_row1.norm_squared() >= from_row2.norm_squared() {
        from_row1
    } else {
        from_row2
    };
    let norm = best.norm();
    (norm > EPS).then(|| best / norm)
}
