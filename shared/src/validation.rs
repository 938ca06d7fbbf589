//! Validation for climate readings and the engine's constant tables

use std::collections::HashSet;

use crate::error::{ClassificationError, EngineResult};
use crate::models::{ClimateCluster, ClimateReading, CropProfile, Range, ReadingField, CLUSTER_COUNT};

// ============================================================================
// Reading Validations
// ============================================================================

/// Sane physical bounds per field, inclusive. `None` means unbounded.
pub const fn reading_limits(field: ReadingField) -> (Option<f64>, Option<f64>) {
    match field {
        ReadingField::Temperature => (Some(-50.0), Some(60.0)),
        ReadingField::SolarRadiation => (Some(0.0), None),
        ReadingField::SoilMoisture => (Some(0.0), Some(100.0)),
        ReadingField::RelativeHumidity => (Some(0.0), Some(100.0)),
        ReadingField::Precipitation => (Some(0.0), Some(1000.0)),
    }
}

/// Reject non-finite or implausible readings before any distance is computed
pub fn validate_reading(reading: &ClimateReading) -> EngineResult<()> {
    for field in ReadingField::ALL {
        let value = reading.get(field);
        if !value.is_finite() {
            return Err(ClassificationError::invalid(field, value, "value must be finite"));
        }
        let (min, max) = reading_limits(field);
        if let Some(min) = min {
            if value < min {
                return Err(ClassificationError::invalid(
                    field,
                    value,
                    format!("must be at least {}", min),
                ));
            }
        }
        if let Some(max) = max {
            if value > max {
                return Err(ClassificationError::invalid(
                    field,
                    value,
                    format!("must be at most {}", max),
                ));
            }
        }
    }
    Ok(())
}

// ============================================================================
// Table Validations
// ============================================================================

/// A scoring range needs `min < max` and `min <= optimum <= max`
pub fn validate_range(label: &str, range: &Range) -> EngineResult<()> {
    if !(range.min.is_finite() && range.max.is_finite() && range.optimum.is_finite()) {
        return Err(ClassificationError::Configuration(format!(
            "{} range has non-finite bounds",
            label
        )));
    }
    if range.min >= range.max {
        return Err(ClassificationError::Configuration(format!(
            "{} range min {} must be below max {}",
            label, range.min, range.max
        )));
    }
    if range.optimum < range.min || range.optimum > range.max {
        return Err(ClassificationError::Configuration(format!(
            "{} optimum {} lies outside [{}, {}]",
            label, range.optimum, range.min, range.max
        )));
    }
    Ok(())
}

/// Clusters must number exactly three, be ordered by id and have finite centroids
pub fn validate_cluster_table(clusters: &[ClimateCluster]) -> EngineResult<()> {
    if clusters.len() != CLUSTER_COUNT {
        return Err(ClassificationError::Configuration(format!(
            "expected {} clusters, found {}",
            CLUSTER_COUNT,
            clusters.len()
        )));
    }
    for (position, cluster) in clusters.iter().enumerate() {
        if cluster.id as usize != position {
            return Err(ClassificationError::Configuration(format!(
                "cluster '{}' has id {} at position {}",
                cluster.name, cluster.id, position
            )));
        }
        if let Some(field) = ReadingField::ALL
            .into_iter()
            .find(|f| !cluster.centroid.get(*f).is_finite())
        {
            return Err(ClassificationError::Configuration(format!(
                "cluster '{}' has a non-finite {} centroid",
                cluster.name, field
            )));
        }
    }
    Ok(())
}

/// Every crop appears once and all of its ranges are well formed
pub fn validate_crop_table(profiles: &[CropProfile]) -> EngineResult<()> {
    if profiles.is_empty() {
        return Err(ClassificationError::Configuration(
            "crop table is empty".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for profile in profiles {
        if !seen.insert(profile.crop) {
            return Err(ClassificationError::Configuration(format!(
                "crop {} is listed more than once",
                profile.crop
            )));
        }
        validate_range(&format!("{} temperature", profile.crop), &profile.temperature)?;
        validate_range(&format!("{} humidity", profile.crop), &profile.humidity)?;
        validate_range(&format!("{} precipitation", profile.crop), &profile.precipitation)?;
    }
    Ok(())
}
