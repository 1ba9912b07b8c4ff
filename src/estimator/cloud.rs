use super::params::ComputeMode;
use super::pipeline::JetEstimator;
use crate::diagnostics::{elapsed_ms, BatchReport, TimingBreakdown};
use crate::error::FitError;
use crate::orient::orient_estimate;
use crate::types::{PointNeighborhood, SurfaceEstimate};
use crate::weighting::WeightingStrategy;
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Serialize;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-query results of a whole-cloud run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudEstimate {
    #[serde(serialize_with = "serialize_results")]
    pub results: Vec<Result<SurfaceEstimate, FitError>>,
    pub report: BatchReport,
}

impl CloudEstimate {
    /// Normal per query, `None` where the fit failed.
    pub fn normals(&self) -> Vec<Option<Vector3<f64>>> {
        self.results
            .iter()
            .map(|r| r.as_ref().ok().map(|e| e.normal))
            .collect()
    }

    /// `(k1, k2)` per query, `None` where the fit failed.
    pub fn curvatures(&self) -> Vec<Option<(f64, f64)>> {
        self.results
            .iter()
            .map(|r| r.as_ref().ok().map(|e| (e.curvature.k1, e.curvature.k2)))
            .collect()
    }
}

impl JetEstimator {
    /// Estimates every query `i` in `0..neighbors.len()` from the points
    /// indexed by `neighbors[i]`.
    ///
    /// Query `i` is `points[i]`. Failures stay attached to their query and
    /// never abort the batch.
    pub fn estimate_cloud(
        &self,
        points: &[Point3<f64>],
        neighbors: &[Vec<usize>],
        strategy: &dyn WeightingStrategy,
    ) -> CloudEstimate {
        let t0 = Instant::now();
        let mut timing = TimingBreakdown::default();
        let fit_one = |i: usize| self.estimate_query(points, neighbors, i, strategy);
        let mut results = self.run_queries(neighbors.len(), fit_one);
        timing.record("fit", t0);

        let orient_start = Instant::now();
        let mut flipped = 0usize;
        if let Some(rule) = &self.params().orientation {
            for estimate in results.iter_mut().flatten() {
                if orient_estimate(estimate, rule) {
                    flipped += 1;
                }
            }
        }
        timing.record("orient", orient_start);

        let mut report = BatchReport::tally(strategy.name(), self.params().order, &results);
        report.flipped = flipped;
        timing.total_ms = elapsed_ms(t0);
        report.timing = timing;
        debug!(
            "estimate_cloud: {}/{} fitted ({} failed, {} flipped) in {:.3} ms",
            report.succeeded, report.total, report.failed, report.flipped, report.timing.total_ms
        );
        CloudEstimate { results, report }
    }

    fn estimate_query(
        &self,
        points: &[Point3<f64>],
        neighbors: &[Vec<usize>],
        i: usize,
        strategy: &dyn WeightingStrategy,
    ) -> Result<SurfaceEstimate, FitError> {
        let query = *points.get(i).ok_or(FitError::NeighborIndexOutOfRange {
            query: i,
            index: i,
            len: points.len(),
        })?;
        let gathered = neighbors[i]
            .iter()
            .map(|&j| {
                points
                    .get(j)
                    .copied()
                    .ok_or(FitError::NeighborIndexOutOfRange {
                        query: i,
                        index: j,
                        len: points.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let nbhd = PointNeighborhood::new(query, &gathered).with_index(i);
        let nbhd = self.truncate(&nbhd);
        let weights = strategy.weights(&nbhd)?;
        self.estimate_unoriented(&nbhd, &weights)
    }

    fn run_queries<F>(&self, count: usize, f: F) -> Vec<Result<SurfaceEstimate, FitError>>
    where
        F: Fn(usize) -> Result<SurfaceEstimate, FitError> + Sync + Send,
    {
        match self.params().compute_mode {
            ComputeMode::Sequential => (0..count).map(f).collect(),
            ComputeMode::Parallel => {
                #[cfg(feature = "parallel")]
                {
                    (0..count).into_par_iter().map(f).collect()
                }
                #[cfg(not(feature = "parallel"))]
                {
                    log::warn!("estimate_cloud: built without `parallel`, running sequentially");
                    (0..count).map(f).collect()
                }
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryOutcome<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<&'a SurfaceEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn serialize_results<S>(
    results: &[Result<SurfaceEstimate, FitError>],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(results.len()))?;
    for result in results {
        let outcome = match result {
            Ok(estimate) => QueryOutcome {
                estimate: Some(estimate),
                error: None,
            },
            Err(err) => QueryOutcome {
                estimate: None,
                error: Some(err.to_string()),
            },
        };
        seq.serialize_element(&outcome)?;
    }
    seq.end()
}
