//! Diagnostics returned alongside batch estimates.
//!
//! `BatchReport` tallies successes and per-kind failures for a cloud run and
//! carries a `TimingBreakdown` of the fit and orientation stages.

pub mod batch;
pub mod timing;

pub use batch::BatchReport;
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
