//! Classification output models

use serde::Serialize;

use super::cluster::ClimateCluster;
use super::crop::{BoundViolation, Crop};

/// Nearest climate profile for a reading
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ClusterAssignment {
    pub cluster: ClimateCluster,
    /// Normalized weighted distance to the cluster centroid
    pub distance: f64,
    /// Display heuristic in [0, 100]; not a probability
    pub confidence: f64,
}

/// Viability outcome for a single crop
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropPrediction {
    pub crop: Crop,
    pub viable: bool,
    /// Closeness to the crop's optimum, in [0, 100]; independent of `viable`
    pub confidence: f64,
    pub optimal_in_cluster: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<BoundViolation>,
    /// Present iff `viable` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_viability_reason: Option<String>,
}

/// Full result of one classification call
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassificationResult {
    pub cluster: ClusterAssignment,
    pub predictions: Vec<CropPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_distance_to_history: Option<f64>,
    pub summary: String,
}

impl ClassificationResult {
    pub fn viable_crops(&self) -> impl Iterator<Item = &CropPrediction> {
        self.predictions.iter().filter(|p| p.viable)
    }

    pub fn prediction(&self, crop: Crop) -> Option<&CropPrediction> {
        self.predictions.iter().find(|p| p.crop == crop)
    }
}
