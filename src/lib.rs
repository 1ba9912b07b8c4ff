#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod estimator;
pub mod orient;
pub mod types;
pub mod weighting;

// Building blocks – public for callers composing their own pipeline.
pub mod angle;
pub mod config;
pub mod curvature;
pub mod diagnostics;
pub mod frame;
pub mod io;
pub mod jet;

// --- High-level re-exports -------------------------------------------------

// Main entry points: estimator + results.
pub use crate::estimator::{CloudEstimate, EstimatorParams, JetEstimator, Method};
pub use crate::types::{PointNeighborhood, SurfaceEstimate, WeightVector};

pub use crate::curvature::PrincipalCurvatures;
pub use crate::error::{FitError, FitErrorKind};
pub use crate::orient::OrientationRule;

// Batch summary returned by `JetEstimator::estimate_cloud`.
pub use crate::diagnostics::BatchReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use jet_normals::prelude::*;
/// use nalgebra::{Point3, Vector3};
///
/// # fn main() {
/// let mut pts = Vec::new();
/// for i in -2..=2 {
///     for j in -2..=2 {
///         let (x, y) = (i as f64 * 0.1, j as f64 * 0.1);
///         pts.push(Point3::new(x, y, 0.5 * (x * x + y * y)));
///     }
/// }
/// let nbhd = PointNeighborhood::new(Point3::origin(), &pts);
/// let est = JetEstimator::new(
///     EstimatorParams::default().with_orientation(OrientationRule::TowardDirection(Vector3::z())),
/// )
/// .estimate_with(&nbhd, &UniformWeights)
/// .unwrap();
/// assert!((est.curvature.k1 - 1.0).abs() < 1e-6);
/// # }
/// ```
pub mod prelude {
    pub use crate::weighting::{UniformWeights, WeightingStrategy};
    pub use crate::{
        EstimatorParams, FitError, JetEstimator, OrientationRule, PointNeighborhood,
        SurfaceEstimate, WeightVector,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::curvature::{monge_normal, principal_curvatures};
    pub use crate::frame::build_local_frame;
    pub use crate::jet::{fit_jet, fit_residual_rms};
    pub use crate::orient::{orient_all, orient_estimate, orient_normals};

    // Stage options and outputs.
    pub use crate::diagnostics::{StageTiming, TimingBreakdown};
    pub use crate::frame::{Centering, FrameOptions, LocalFrame, ScaleMode};
    pub use crate::jet::{JetCoefficients, JetFitOptions};
}
