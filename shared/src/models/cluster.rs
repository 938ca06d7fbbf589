//! Climate profile clusters
//!
//! Three profiles found by K-Means (K=3) over the historical station data.
//! The centroids are fixed; they are never refit at runtime.

use serde::Serialize;

use super::crop::Crop;
use super::reading::ClimateReading;
use crate::types::Language;

/// Number of climate profiles the classifier expects
pub const CLUSTER_COUNT: usize = 3;

/// A climate profile with its centroid and the crops it favours
///
/// Holds `&'static` strings so the table can live in a `static`; it is
/// serialized for responses but never deserialized.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ClimateCluster {
    pub id: u8,
    pub name: &'static str,
    pub name_es: &'static str,
    pub description: &'static str,
    pub description_es: &'static str,
    pub optimal_crops: &'static [Crop],
    pub centroid: ClimateReading,
    /// Number of historical days assigned to this profile
    pub population_size: u32,
    pub display_color: &'static str,
}

impl ClimateCluster {
    pub fn is_optimal_for(&self, crop: Crop) -> bool {
        self.optimal_crops.contains(&crop)
    }

    pub fn localized_name(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.name,
            Language::Spanish => self.name_es,
        }
    }
}

pub static CLIMATE_CLUSTERS: [ClimateCluster; CLUSTER_COUNT] = [
    ClimateCluster {
        id: 0,
        name: "Heavy Rainfall",
        name_es: "Exceso de Lluvias",
        description: "Days with high precipitation and elevated humidity",
        description_es: "Días con precipitación alta y humedad elevada",
        optimal_crops: &[Crop::Tomato, Crop::Banana],
        centroid: ClimateReading::new(25.14, 4.94, 84.42, 84.41, 35.86),
        population_size: 64,
        display_color: "#3b82f6",
    },
    ClimateCluster {
        id: 1,
        name: "Moderate Conditions",
        name_es: "Condiciones Moderadas",
        description: "Days balanced between temperature, humidity and radiation",
        description_es: "Días con balance entre temperatura, humedad y radiación",
        optimal_crops: &[Crop::Banana, Crop::Cacao],
        centroid: ClimateReading::new(26.25, 4.89, 83.84, 83.87, 7.01),
        population_size: 241,
        display_color: "#10b981",
    },
    ClimateCluster {
        id: 2,
        name: "Dry Conditions",
        name_es: "Condiciones Secas",
        description: "Days with low precipitation and reduced humidity",
        description_es: "Días con baja precipitación y humedad reducida",
        optimal_crops: &[Crop::Maize, Crop::Rice, Crop::Cacao],
        centroid: ClimateReading::new(26.29, 4.50, 78.45, 75.38, 1.32),
        population_size: 261,
        display_color: "#f59e0b",
    },
];

