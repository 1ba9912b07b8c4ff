use serde::{Deserialize, Serialize};

/// Where the local frame is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Origin at the query point; the jet is evaluated exactly there.
    #[default]
    QueryPoint,
    /// Origin at the neighbour centroid.
    Centroid,
}

/// Characteristic length used to make local coordinates dimensionless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Largest neighbour distance from the frame origin.
    #[default]
    MaxRadius,
    /// Mean neighbour distance from the frame origin.
    MeanRadius,
    /// No normalization (scale = 1).
    Unit,
}

/// Options controlling local frame construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
    pub centering: Centering,
    pub scale: ScaleMode,
    /// Relative threshold on λ₂/λ₁ below which the points count as collinear.
    pub degenerate_tol: f64,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            centering: Centering::QueryPoint,
            scale: ScaleMode::MaxRadius,
            degenerate_tol: 1e-10,
        }
    }
}

impl FrameOptions {
    pub fn with_centering(mut self, centering: Centering) -> Self {
        self.centering = centering;
        self
    }

    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }
}
