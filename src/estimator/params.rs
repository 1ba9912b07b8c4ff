//! Parameter types configuring the estimator.
//!
//! Defaults reproduce classic unweighted order-2 jet fitting with the frame
//! anchored at the query point and no orientation step. For tuning, start
//! with `order` and the neighbourhood size.

use crate::error::FitError;
use crate::frame::FrameOptions;
use crate::jet::JetFitOptions;
use crate::orient::OrientationRule;
use serde::{Deserialize, Serialize};

/// How a batch of neighbourhoods is scheduled.
///
/// Injected as configuration; results are identical in both modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeMode {
    #[default]
    Sequential,
    /// rayon thread pool; requires the `parallel` feature.
    Parallel,
}

/// Named presets for the common estimator variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Tangent-plane fit only (order 1): normals, zero curvature.
    Pca,
    /// Unweighted order-2 jet.
    Jet,
    /// Order-3 jet driven by an external weighting oracle.
    Weighted,
}

impl Method {
    pub fn order(self) -> usize {
        match self {
            Method::Pca => 1,
            Method::Jet => 2,
            Method::Weighted => 3,
        }
    }
}

/// Estimator-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Jet order (≥1). Order 1 yields normals without curvature.
    pub order: usize,
    /// Keep only the first `k` neighbours of each query (`None` = all).
    pub neighbors: Option<usize>,
    pub frame: FrameOptions,
    pub fit: JetFitOptions,
    /// Applied to every estimate when set.
    pub orientation: Option<OrientationRule>,
    pub compute_mode: ComputeMode,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            order: 2,
            neighbors: None,
            frame: FrameOptions::default(),
            fit: JetFitOptions::default(),
            orientation: None,
            compute_mode: ComputeMode::Sequential,
        }
    }
}

impl EstimatorParams {
    pub fn for_method(method: Method) -> Self {
        Self {
            order: method.order(),
            ..Default::default()
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_orientation(mut self, rule: OrientationRule) -> Self {
        self.orientation = Some(rule);
        self
    }

    pub fn with_compute_mode(mut self, mode: ComputeMode) -> Self {
        self.compute_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), FitError> {
        if self.order < 1 {
            return Err(FitError::InvalidOrder {
                order: self.order,
                minimum: 1,
            });
        }
        Ok(())
    }
}
