use crate::curvature::PrincipalCurvatures;
use crate::error::FitError;
use crate::frame::LocalFrame;
use crate::jet::JetCoefficients;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Neighbours of one query point, all in the cloud's ambient frame.
///
/// The query point may or may not appear among `neighbors`; the builders
/// treat both cases the same.
#[derive(Clone, Copy, Debug)]
pub struct PointNeighborhood<'a> {
    /// Index of the query point in its source cloud (0 for standalone use).
    pub index: usize,
    pub query: Point3<f64>,
    pub neighbors: &'a [Point3<f64>],
}

impl<'a> PointNeighborhood<'a> {
    pub fn new(query: Point3<f64>, neighbors: &'a [Point3<f64>]) -> Self {
        Self {
            index: 0,
            query,
            neighbors,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Largest neighbour distance from the query point.
    pub fn radius(&self) -> f64 {
        self.neighbors
            .iter()
            .map(|p| (p - self.query).norm())
            .fold(0.0, f64::max)
    }
}

/// Non-negative per-neighbour weights, same order as the neighbourhood.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Validates and wraps `values`. Negative or non-finite entries are rejected.
    pub fn new(values: Vec<f64>) -> Result<Self, FitError> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(FitError::InvalidWeight { index, value });
        }
        Ok(Self(values))
    }

    /// All-ones weights (classic unweighted jet fitting).
    pub fn uniform(k: usize) -> Self {
        Self(vec![1.0; k])
    }

    /// Multiplies every weight by `c > 0`. Other factors yield
    /// [`FitError::InvalidWeight`] with `index` 0 and the factor as `value`.
    pub fn scaled(&self, c: f64) -> Result<Self, FitError> {
        if !(c.is_finite() && c > 0.0) {
            return Err(FitError::InvalidWeight { index: 0, value: c });
        }
        Self::new(self.0.iter().map(|w| w * c).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of strictly positive weights.
    pub fn effective_count(&self) -> usize {
        self.0.iter().filter(|&&w| w > 0.0).count()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Per-query output: normal, principal curvatures, and the fitted jet.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceEstimate {
    pub query: Point3<f64>,
    /// Unit normal of the fitted patch at the query point.
    pub normal: Vector3<f64>,
    /// Curvatures relative to `normal`; flipped together with it.
    pub curvature: PrincipalCurvatures,
    /// Coefficients in the normalized local frame (see `frame`).
    pub jet: JetCoefficients,
    pub frame: LocalFrame,
    /// True once an orientation rule has been applied.
    pub oriented: bool,
    /// Weighted RMS of the fit residual, in normalized units.
    pub residual_rms: f64,
}
