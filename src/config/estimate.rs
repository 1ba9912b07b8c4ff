use crate::estimator::EstimatorParams;
use crate::weighting::{GaussianWeights, PrecomputedWeights, UniformWeights, WeightingStrategy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EstimateToolConfig {
    /// Point cloud JSON (`PointCloudInput`).
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub params: EstimatorParams,
    #[serde(default)]
    pub weighting: WeightingConfig,
    pub output: EstimateOutputConfig,
}

/// Source of the per-neighbour weights.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightingConfig {
    #[default]
    Uniform,
    /// Gaussian falloff with the neighbourhood radius.
    Gaussian {
        #[serde(default = "default_sigma_rel")]
        sigma_rel: f64,
    },
    /// Rows from the input file's `weights` table.
    Precomputed,
}

fn default_sigma_rel() -> f64 {
    GaussianWeights::default().sigma_rel
}

impl WeightingConfig {
    /// Builds the strategy; `table` is the input's weight rows, if any.
    pub fn to_strategy(
        &self,
        table: Option<Vec<Vec<f64>>>,
    ) -> Result<Box<dyn WeightingStrategy>, String> {
        match self {
            WeightingConfig::Uniform => Ok(Box::new(UniformWeights)),
            WeightingConfig::Gaussian { sigma_rel } => {
                if !(sigma_rel.is_finite() && *sigma_rel > 0.0) {
                    return Err(format!("sigma_rel must be positive, got {sigma_rel}"));
                }
                Ok(Box::new(GaussianWeights {
                    sigma_rel: *sigma_rel,
                }))
            }
            WeightingConfig::Precomputed => {
                let rows =
                    table.ok_or("weighting.kind = \"precomputed\" but input has no weights")?;
                Ok(Box::new(PrecomputedWeights::new(rows)))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EstimateOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<EstimateToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
