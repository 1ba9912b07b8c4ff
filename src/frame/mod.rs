//! Local tangent-plane frame built from a neighbourhood's covariance.
//!
//! Overview
//! - Covariance is always accumulated about the neighbour centroid. The
//!   eigenvector of the smallest eigenvalue becomes the provisional normal,
//!   the other two span the tangent plane.
//! - [`Centering`] only decides the frame origin. With the default
//!   `QueryPoint` the fitted jet is evaluated exactly at the query point.
//! - Coordinates are divided by a characteristic radius ([`ScaleMode`]) so the
//!   least-squares system is well conditioned at any cloud scale. The radius is
//!   kept on the frame to de-normalize curvature later.
//! - The basis is right-handed: `normal = tangent1 × tangent2`.

mod options;

pub use options::{Centering, FrameOptions, ScaleMode};

use crate::error::FitError;
use crate::types::PointNeighborhood;
use log::debug;
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use serde::Serialize;

const MIN_POINTS: usize = 3;
const EPS: f64 = 1e-300;

/// Orthonormal tangent/normal basis plus translation and scale.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFrame {
    pub origin: Point3<f64>,
    pub tangent1: Vector3<f64>,
    pub tangent2: Vector3<f64>,
    /// Provisional normal (smallest-variance direction).
    pub normal: Vector3<f64>,
    pub scale: f64,
    /// Covariance eigenvalues in descending order.
    pub eigenvalues: [f64; 3],
}

impl LocalFrame {
    /// Maps an ambient point to normalized local `(x, y, z)`.
    pub fn to_local(&self, p: &Point3<f64>) -> Vector3<f64> {
        self.to_local_dir(&(p - self.origin)) / self.scale
    }

    /// Rotates an ambient vector into the local basis (no scaling).
    pub fn to_local_dir(&self, v: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            v.dot(&self.tangent1),
            v.dot(&self.tangent2),
            v.dot(&self.normal),
        )
    }

    /// Rotates a local vector back into ambient space (no scaling).
    pub fn to_ambient_dir(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.tangent1 * v.x + self.tangent2 * v.y + self.normal * v.z
    }

    /// Inverse of [`LocalFrame::to_local`].
    pub fn to_ambient(&self, p: &Vector3<f64>) -> Point3<f64> {
        self.origin + self.to_ambient_dir(p) * self.scale
    }

    /// λ₃ / (λ₁ + λ₂ + λ₃), the PCA surface-variation measure.
    pub fn surface_variation(&self) -> f64 {
        let sum: f64 = self.eigenvalues.iter().sum();
        if sum <= EPS {
            0.0
        } else {
            self.eigenvalues[2] / sum
        }
    }
}

/// Builds the local frame for `nbhd` and returns the neighbours expressed in it.
///
/// Fails with [`FitError::DegenerateNeighborhood`] for fewer than three points
/// or when the covariance has rank < 2 (coincident or collinear points).
pub fn build_local_frame(
    nbhd: &PointNeighborhood<'_>,
    opts: &FrameOptions,
) -> Result<(LocalFrame, Vec<Vector3<f64>>), FitError> {
    let k = nbhd.len();
    if k < MIN_POINTS {
        return Err(FitError::DegenerateNeighborhood {
            points: k,
            reason: "fewer than three points",
        });
    }

    let mut centroid = Vector3::zeros();
    for p in nbhd.neighbors {
        centroid += p.coords;
    }
    centroid /= k as f64;

    let mut cov = Matrix3::zeros();
    for p in nbhd.neighbors {
        let d = p.coords - centroid;
        cov += d * d.transpose();
    }
    cov /= k as f64;

    let eigen = SymmetricEigen::new(cov);
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
    let eigenvalues = order.map(|i| eigen.eigenvalues[i].max(0.0));

    if !eigenvalues[0].is_finite() || eigenvalues[0] <= EPS {
        debug!("frame: query {} has coincident neighbors", nbhd.index);
        return Err(FitError::DegenerateNeighborhood {
            points: k,
            reason: "coincident points",
        });
    }
    if eigenvalues[1] <= opts.degenerate_tol * eigenvalues[0] {
        debug!(
            "frame: query {} is collinear (λ2/λ1 = {:.3e})",
            nbhd.index,
            eigenvalues[1] / eigenvalues[0]
        );
        return Err(FitError::DegenerateNeighborhood {
            points: k,
            reason: "collinear points",
        });
    }

    let tangent1: Vector3<f64> = eigen.eigenvectors.column(order[0]).into_owned().normalize();
    let t2_raw: Vector3<f64> = eigen.eigenvectors.column(order[1]).into_owned();
    // Re-orthogonalize; equal eigenvalues leave any rotation in the plane valid.
    let tangent2 = (t2_raw - tangent1 * tangent1.dot(&t2_raw)).normalize();
    let normal = tangent1.cross(&tangent2);

    let origin = match opts.centering {
        Centering::QueryPoint => nbhd.query,
        Centering::Centroid => Point3::from(centroid),
    };

    let scale = characteristic_radius(nbhd.neighbors, &origin, opts.scale);
    if !scale.is_finite() || scale <= EPS {
        return Err(FitError::DegenerateNeighborhood {
            points: k,
            reason: "zero neighborhood radius",
        });
    }

    let frame = LocalFrame {
        origin,
        tangent1,
        tangent2,
        normal,
        scale,
        eigenvalues,
    };
    let local = nbhd.neighbors.iter().map(|p| frame.to_local(p)).collect();
    Ok((frame, local))
}

fn characteristic_radius(points: &[Point3<f64>], origin: &Point3<f64>, mode: ScaleMode) -> f64 {
    match mode {
        ScaleMode::Unit => 1.0,
        ScaleMode::MaxRadius => points
            .iter()
            .map(|p| (p - origin).norm())
            .fold(0.0, f64::max),
        ScaleMode::MeanRadius => {
            let sum: f64 = points.iter().map(|p| (p - origin).norm()).sum();
            sum / points.len().max(1) as f64
        }
    }
}
