use super::TimingBreakdown;
use crate::error::{FitError, FitErrorKind};
use crate::types::SurfaceEstimate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of a whole-cloud estimation run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Weighting strategy label.
    pub weighting: String,
    pub order: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures_by_kind: BTreeMap<FitErrorKind, usize>,
    /// Normals flipped by the orientation rule (0 when none is configured).
    pub flipped: usize,
    /// Mean weighted residual RMS over successful fits (normalized units).
    pub mean_residual_rms: f64,
    pub timing: TimingBreakdown,
}

impl BatchReport {
    /// Tallies per-query outcomes.
    pub fn tally(
        weighting: impl Into<String>,
        order: usize,
        results: &[Result<SurfaceEstimate, FitError>],
    ) -> Self {
        let mut report = Self {
            weighting: weighting.into(),
            order,
            total: results.len(),
            ..Default::default()
        };
        let mut residual_sum = 0.0;
        for result in results {
            match result {
                Ok(estimate) => {
                    report.succeeded += 1;
                    residual_sum += estimate.residual_rms;
                }
                Err(err) => {
                    report.failed += 1;
                    *report.failures_by_kind.entry(err.kind()).or_insert(0) += 1;
                }
            }
        }
        if report.succeeded > 0 {
            report.mean_residual_rms = residual_sum / report.succeeded as f64;
        }
        report
    }

    pub fn success_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_grouped_by_kind() {
        let results: Vec<Result<SurfaceEstimate, FitError>> = vec![
            Err(FitError::DegenerateNeighborhood {
                points: 2,
                reason: "fewer than three points",
            }),
            Err(FitError::WeightLengthMismatch {
                weights: 1,
                points: 3,
            }),
            Err(FitError::NeighborIndexOutOfRange {
                query: 0,
                index: 9,
                len: 4,
            }),
        ];
        let report = BatchReport::tally("uniform", 2, &results);
        assert_eq!(report.total, 3);
        assert_eq!(report.failed, 3);
        assert_eq!(report.success_ratio(), 0.0);
        assert_eq!(report.failures_by_kind[&FitErrorKind::InvalidInput], 2);
        assert_eq!(report.mean_residual_rms, 0.0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failuresByKind"]["degenerateNeighborhood"], 1);
    }
}
