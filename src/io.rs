//! JSON interchange helpers.
//!
//! - `PointCloudInput`: points, per-query neighbour indices, optional weights.
//! - `read_json_file`: deserialize any value from a JSON file.
//! - `write_json_file`: pretty-print a serializable value to disk.
use nalgebra::Point3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Point cloud plus precomputed neighbour lists.
///
/// `neighbors[i]` indexes the neighbours of `points[i]`. `weights`, when
/// present, holds one weight row per query in the same order (e.g. the output
/// of a learned weighting model).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PointCloudInput {
    pub points: Vec<Point3<f64>>,
    pub neighbors: Vec<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Vec<f64>>>,
}

impl PointCloudInput {
    /// Checks that neighbour and weight tables line up with the cloud.
    pub fn validate(&self) -> Result<(), String> {
        if self.neighbors.len() > self.points.len() {
            return Err(format!(
                "{} neighbor lists for {} points",
                self.neighbors.len(),
                self.points.len()
            ));
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.neighbors.len() {
                return Err(format!(
                    "{} weight rows for {} neighbor lists",
                    weights.len(),
                    self.neighbors.len()
                ));
            }
        }
        Ok(())
    }
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
