use super::params::EstimatorParams;
use crate::curvature::{monge_normal, principal_curvatures};
use crate::error::FitError;
use crate::frame::build_local_frame;
use crate::jet::{fit_jet, fit_residual_rms};
use crate::orient::orient_estimate;
use crate::types::{PointNeighborhood, SurfaceEstimate, WeightVector};
use crate::weighting::WeightingStrategy;
use log::debug;
use nalgebra::Point3;

/// Normal and curvature estimator for single neighbourhoods.
///
/// The estimator is stateless apart from its parameters, so one instance can
/// be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct JetEstimator {
    params: EstimatorParams,
}

impl JetEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Fits one neighbourhood with the given weights and applies the
    /// configured orientation rule.
    pub fn estimate(
        &self,
        nbhd: &PointNeighborhood<'_>,
        weights: &WeightVector,
    ) -> Result<SurfaceEstimate, FitError> {
        let mut estimate = self.estimate_unoriented(nbhd, weights)?;
        if let Some(rule) = &self.params.orientation {
            orient_estimate(&mut estimate, rule);
        }
        Ok(estimate)
    }

    /// Like [`JetEstimator::estimate`], with weights from `strategy`.
    pub fn estimate_with(
        &self,
        nbhd: &PointNeighborhood<'_>,
        strategy: &dyn WeightingStrategy,
    ) -> Result<SurfaceEstimate, FitError> {
        let nbhd = self.truncate(nbhd);
        let weights = strategy.weights(&nbhd)?;
        self.estimate(&nbhd, &weights)
    }

    pub(crate) fn estimate_unoriented(
        &self,
        nbhd: &PointNeighborhood<'_>,
        weights: &WeightVector,
    ) -> Result<SurfaceEstimate, FitError> {
        self.params.validate()?;
        if weights.len() != nbhd.len() {
            return Err(FitError::WeightLengthMismatch {
                weights: weights.len(),
                points: nbhd.len(),
            });
        }
        let nbhd = self.truncate(nbhd);
        let weights = &weights.as_slice()[..nbhd.len()];

        // Zero-weight neighbours leave before the frame is built.
        let (support, support_weights): (Vec<Point3<f64>>, Vec<f64>) = nbhd
            .neighbors
            .iter()
            .zip(weights)
            .filter(|(_, &w)| w > 0.0)
            .map(|(p, &w)| (*p, w))
            .unzip();
        if support.len() < nbhd.len() {
            debug!(
                "estimate: query {} dropped {} zero-weight neighbors",
                nbhd.index,
                nbhd.len() - support.len()
            );
        }
        let nbhd = PointNeighborhood {
            neighbors: &support,
            ..nbhd
        };
        let weights = &WeightVector::new(support_weights)?;

        let (frame, local) = build_local_frame(&nbhd, &self.params.frame)?;
        let jet = fit_jet(&local, weights, self.params.order, &self.params.fit).map_err(|err| {
            debug!("estimate: query {} fit failed: {err}", nbhd.index);
            err
        })?;
        let normal = monge_normal(&jet, &frame);
        let curvature = principal_curvatures(&jet, &frame);
        let residual_rms = fit_residual_rms(&local, weights, &jet);

        Ok(SurfaceEstimate {
            query: nbhd.query,
            normal,
            curvature,
            jet,
            frame,
            oriented: false,
            residual_rms,
        })
    }

    pub(super) fn truncate<'a>(&self, nbhd: &PointNeighborhood<'a>) -> PointNeighborhood<'a> {
        match self.params.neighbors {
            Some(k) if k < nbhd.len() => PointNeighborhood {
                neighbors: &nbhd.neighbors[..k],
                ..*nbhd
            },
            _ => *nbhd,
        }
    }
}
