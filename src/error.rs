//! Failure modes of a single neighbourhood fit.
//!
//! Every error is local to one query point. Batch callers record it against
//! that point and keep going; see [`crate::estimator::JetEstimator::estimate_cloud`].

use serde::{Deserialize, Serialize};

/// Reasons a neighbourhood could not be fitted.
#[derive(Clone, Debug, PartialEq)]
pub enum FitError {
    /// Too few points, or the points span less than a plane.
    DegenerateNeighborhood { points: usize, reason: &'static str },
    /// The weighted design matrix lost column rank.
    RankDeficientFit {
        order: usize,
        required: usize,
        effective: usize,
        rank: usize,
    },
    /// Polynomial order outside the supported range.
    InvalidOrder { order: usize, minimum: usize },
    /// Negative or non-finite weight.
    InvalidWeight { index: usize, value: f64 },
    /// Weight vector and neighbourhood disagree in length.
    WeightLengthMismatch { weights: usize, points: usize },
    /// Neighbour list references a point outside the cloud.
    NeighborIndexOutOfRange {
        query: usize,
        index: usize,
        len: usize,
    },
}

/// Coarse classification used for per-kind tallies in batch reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitErrorKind {
    DegenerateNeighborhood,
    RankDeficientFit,
    InvalidOrder,
    InvalidWeight,
    InvalidInput,
}

impl FitError {
    pub fn kind(&self) -> FitErrorKind {
        match self {
            FitError::DegenerateNeighborhood { .. } => FitErrorKind::DegenerateNeighborhood,
            FitError::RankDeficientFit { .. } => FitErrorKind::RankDeficientFit,
            FitError::InvalidOrder { .. } => FitErrorKind::InvalidOrder,
            FitError::InvalidWeight { .. } => FitErrorKind::InvalidWeight,
            FitError::WeightLengthMismatch { .. } | FitError::NeighborIndexOutOfRange { .. } => {
                FitErrorKind::InvalidInput
            }
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::DegenerateNeighborhood { points, reason } => {
                write!(f, "degenerate neighborhood ({points} points): {reason}")
            }
            FitError::RankDeficientFit {
                order,
                required,
                effective,
                rank,
            } => write!(
                f,
                "rank-deficient order-{order} fit (rank {rank} < {required}, {effective} effective points)"
            ),
            FitError::InvalidOrder { order, minimum } => {
                write!(f, "invalid polynomial order {order} (need ≥{minimum})")
            }
            FitError::InvalidWeight { index, value } => {
                write!(f, "invalid weight {value} at neighbor {index}")
            }
            FitError::WeightLengthMismatch { weights, points } => {
                write!(f, "{weights} weights supplied for {points} neighbors")
            }
            FitError::NeighborIndexOutOfRange { query, index, len } => write!(
                f,
                "query {query}: neighbor index {index} out of range (cloud has {len} points)"
            ),
        }
    }
}

impl std::error::Error for FitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_input_errors() {
        let a = FitError::WeightLengthMismatch {
            weights: 3,
            points: 4,
        };
        let b = FitError::NeighborIndexOutOfRange {
            query: 0,
            index: 9,
            len: 5,
        };
        assert_eq!(a.kind(), FitErrorKind::InvalidInput);
        assert_eq!(b.kind(), FitErrorKind::InvalidInput);
    }

    #[test]
    fn display_mentions_rank() {
        let err = FitError::RankDeficientFit {
            order: 2,
            required: 6,
            effective: 4,
            rank: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("rank 4 < 6"), "unexpected message: {msg}");
    }
}
