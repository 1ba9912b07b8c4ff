//! Estimator running frame → fit → curvature → orientation per neighbourhood.
//!
//! Overview
//! - [`JetEstimator::estimate`] processes one neighbourhood with explicit
//!   weights. [`JetEstimator::estimate_with`] asks a [`WeightingStrategy`]
//!   for them first.
//! - [`JetEstimator::estimate_cloud`] runs every query of a cloud given its
//!   neighbour index lists. Each query is independent; a failed fit is
//!   recorded for that query and the batch continues.
//! - [`ComputeMode::Parallel`] distributes queries over rayon when the crate
//!   is built with the `parallel` feature. Scheduling never changes results.
//!
//! Modules
//! - [`params`] – configuration types.
//! - `pipeline` – the single-neighbourhood [`JetEstimator`].
//! - `cloud` – whole-cloud batching and its [`CloudEstimate`] output.
//!
//! [`WeightingStrategy`]: crate::weighting::WeightingStrategy

mod cloud;
pub mod params;
mod pipeline;

pub use cloud::CloudEstimate;
pub use params::{ComputeMode, EstimatorParams, Method};
pub use pipeline::JetEstimator;
