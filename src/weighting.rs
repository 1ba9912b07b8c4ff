//! Per-neighbour weight sources for the jet fitter.
//!
//! The fitter only consumes a [`WeightVector`]. Where the weights come from is
//! a [`WeightingStrategy`]: uniform weights give classic jet fitting, a
//! learned model plugs in through [`FnWeights`] or [`PrecomputedWeights`], and
//! [`GaussianWeights`] is a fixed distance kernel.

use crate::error::FitError;
use crate::types::{PointNeighborhood, WeightVector};

/// Produces one weight per neighbour.
pub trait WeightingStrategy: Send + Sync {
    /// Short label used in logs and reports.
    fn name(&self) -> &str;

    fn weights(&self, nbhd: &PointNeighborhood<'_>) -> Result<WeightVector, FitError>;
}

/// All-ones weights.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformWeights;

impl WeightingStrategy for UniformWeights {
    fn name(&self) -> &str {
        "uniform"
    }

    fn weights(&self, nbhd: &PointNeighborhood<'_>) -> Result<WeightVector, FitError> {
        Ok(WeightVector::uniform(nbhd.len()))
    }
}

/// Adapter for an external weighting oracle given as a closure.
pub struct FnWeights<F> {
    name: String,
    oracle: F,
}

impl<F> FnWeights<F>
where
    F: Fn(&PointNeighborhood<'_>) -> Vec<f64> + Send + Sync,
{
    pub fn new(name: impl Into<String>, oracle: F) -> Self {
        Self {
            name: name.into(),
            oracle,
        }
    }
}

impl<F> WeightingStrategy for FnWeights<F>
where
    F: Fn(&PointNeighborhood<'_>) -> Vec<f64> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn weights(&self, nbhd: &PointNeighborhood<'_>) -> Result<WeightVector, FitError> {
        let values = (self.oracle)(nbhd);
        if values.len() != nbhd.len() {
            return Err(FitError::WeightLengthMismatch {
                weights: values.len(),
                points: nbhd.len(),
            });
        }
        WeightVector::new(values)
    }
}

/// Weights computed ahead of time, indexed by query index.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedWeights {
    table: Vec<Vec<f64>>,
}

impl PrecomputedWeights {
    pub fn new(table: Vec<Vec<f64>>) -> Self {
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl WeightingStrategy for PrecomputedWeights {
    fn name(&self) -> &str {
        "precomputed"
    }

    fn weights(&self, nbhd: &PointNeighborhood<'_>) -> Result<WeightVector, FitError> {
        let row = self.table.get(nbhd.index).map(Vec::as_slice).unwrap_or(&[]);
        if row.len() != nbhd.len() {
            return Err(FitError::WeightLengthMismatch {
                weights: row.len(),
                points: nbhd.len(),
            });
        }
        WeightVector::new(row.to_vec())
    }
}

/// Gaussian kernel on the distance to the query point.
///
/// `w = exp(−d² / 2σ²)` with `σ = sigma_rel · radius`, where `radius` is the
/// neighbourhood's largest query distance.
#[derive(Clone, Copy, Debug)]
pub struct GaussianWeights {
    pub sigma_rel: f64,
}

impl Default for GaussianWeights {
    fn default() -> Self {
        Self { sigma_rel: 0.5 }
    }
}

impl WeightingStrategy for GaussianWeights {
    fn name(&self) -> &str {
        "gaussian"
    }

    fn weights(&self, nbhd: &PointNeighborhood<'_>) -> Result<WeightVector, FitError> {
        let sigma = self.sigma_rel * nbhd.radius();
        if !sigma.is_finite() || sigma <= 0.0 {
            return Ok(WeightVector::uniform(nbhd.len()));
        }
        let inv = 1.0 / (2.0 * sigma * sigma);
        let values = nbhd
            .neighbors
            .iter()
            .map(|p| (-(p - nbhd.query).norm_squared() * inv).exp())
            .collect();
        WeightVector::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn sample() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn uniform_matches_length() {
        let pts = sample();
        let w = UniformWeights
            .weights(&PointNeighborhood::new(pts[0], &pts))
            .unwrap();
        assert_eq!(w.as_slice(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn oracle_output_is_validated() {
        let pts = sample();
        let nbhd = PointNeighborhood::new(pts[0], &pts);
        let short = FnWeights::new("short", |_: &PointNeighborhood<'_>| vec![1.0]);
        assert!(matches!(
            short.weights(&nbhd),
            Err(FitError::WeightLengthMismatch {
                weights: 1,
                points: 3
            })
        ));
        let negative = FnWeights::new("neg", |n: &PointNeighborhood<'_>| vec![-1.0; n.len()]);
        assert!(matches!(
            negative.weights(&nbhd),
            Err(FitError::InvalidWeight { index: 0, .. })
        ));
        assert_eq!(negative.name(), "neg");
    }

    #[test]
    fn precomputed_looks_up_by_query_index() {
        let pts = sample();
        let table = PrecomputedWeights::new(vec![vec![1.0; 3], vec![0.5, 0.25, 0.0]]);
        let w = table
            .weights(&PointNeighborhood::new(pts[1], &pts).with_index(1))
            .unwrap();
        assert_eq!(w.as_slice(), &[0.5, 0.25, 0.0]);
        assert!(table
            .weights(&PointNeighborhood::new(pts[2], &pts).with_index(5))
            .is_err());
    }

    #[test]
    fn gaussian_decays_with_distance() {
        let pts = sample();
        let w = GaussianWeights::default()
            .weights(&PointNeighborhood::new(pts[0], &pts))
            .unwrap();
        let w = w.as_slice();
        assert_eq!(w[0], 1.0);
        assert!(w[1] > w[2] && w[2] > 0.0);
    }
}
