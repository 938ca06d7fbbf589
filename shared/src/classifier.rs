//! Crop viability classifier
//!
//! Classification runs two independent steps over one reading:
//! - nearest climate profile, using all five fields and a normalized
//!   weighted Euclidean distance
//! - per-crop scoring, using only temperature, humidity and precipitation
//!
//! Everything here is a pure function of the reading and the constant
//! tables. A [`Classifier`] is a `Copy` handle and can be shared freely
//! across threads.

use crate::error::{ClassificationError, EngineResult};
use crate::models::{
    BoundSide, BoundViolation, ClassificationResult, ClimateCluster, ClimateReading,
    ClusterAssignment, CropPrediction, CropProfile, Range, ReadingField, ScoredDimension,
    CLIMATE_CLUSTERS, CROP_PROFILES,
};
use crate::summary::build_summary;
use crate::types::Language;
use crate::validation::{validate_cluster_table, validate_crop_table, validate_reading};

/// Per-field divisors for the cluster distance. Fixed design constants so that
/// no single field dominates through its numeric range; never refit from data.
pub const NORMALIZATION_SCALES: [(ReadingField, f64); 5] = [
    (ReadingField::Temperature, 10.0),
    (ReadingField::SolarRadiation, 5.0),
    (ReadingField::SoilMoisture, 100.0),
    (ReadingField::RelativeHumidity, 100.0),
    (ReadingField::Precipitation, 50.0),
];

/// Cluster confidence drops by this many points per unit of distance
pub const CLUSTER_CONFIDENCE_SCALE: f64 = 100.0;

/// Weights of the per-dimension sub-scores in a crop's confidence
pub const SCORE_WEIGHTS: [(ScoredDimension, f64); 3] = [
    (ScoredDimension::Temperature, 0.35),
    (ScoredDimension::Humidity, 0.25),
    (ScoredDimension::Precipitation, 0.40),
];

const FALLBACK_REASON: &str = "conditions not optimal";

/// Normalized weighted Euclidean distance between two readings
pub fn normalized_distance(a: &ClimateReading, b: &ClimateReading) -> f64 {
    NORMALIZATION_SCALES
        .iter()
        .map(|(field, scale)| {
            let delta = (a.get(*field) - b.get(*field)) / scale;
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}

/// Map a centroid distance to a 0-100 display confidence
pub fn cluster_confidence(distance: f64) -> f64 {
    (100.0 - distance * CLUSTER_CONFIDENCE_SCALE).clamp(0.0, 100.0)
}

/// Sub-score of one value against one range.
///
/// Inside the range the score runs from 50 at the far bound to 100 at the
/// optimum. Outside it falls from just under 50 to 0 once the overshoot
/// reaches the width of the range.
pub fn dimension_score(value: f64, range: &Range) -> f64 {
    match range.violated_side(value) {
        Some(side) => {
            let overshoot = match side {
                BoundSide::Below => range.min - value,
                BoundSide::Above => value - range.max,
            };
            let penalty = (overshoot / range.width()).min(1.0);
            (50.0 - 50.0 * penalty).max(0.0)
        }
        None => {
            let spread = (range.optimum - range.min).max(range.max - range.optimum);
            let closeness = 1.0 - (value - range.optimum).abs() / spread;
            50.0 + 50.0 * closeness
        }
    }
}

/// Weighted confidence of a crop for a reading, in [0, 100]
pub fn crop_confidence(profile: &CropProfile, reading: &ClimateReading) -> f64 {
    SCORE_WEIGHTS
        .iter()
        .map(|(dimension, weight)| {
            let value = reading.get(dimension.reading_field());
            dimension_score(value, profile.range(*dimension)) * weight
        })
        .sum::<f64>()
        .clamp(0.0, 100.0)
}

/// Boolean viability: closed-range membership on every gating dimension
pub fn is_viable(profile: &CropProfile, reading: &ClimateReading) -> bool {
    profile
        .gating_dimensions()
        .all(|d| profile.range(d).contains(reading.get(d.reading_field())))
}

/// Gating bounds the reading violates, in dimension order
pub fn viability_violations(profile: &CropProfile, reading: &ClimateReading) -> Vec<BoundViolation> {
    profile
        .gating_dimensions()
        .filter_map(|dimension| {
            let range = profile.range(dimension);
            let value = reading.get(dimension.reading_field());
            range.violated_side(value).map(|side| BoundViolation {
                dimension,
                side,
                value,
                limit: match side {
                    BoundSide::Below => range.min,
                    BoundSide::Above => range.max,
                },
            })
        })
        .collect()
}

/// Join violation clauses into one reason string
pub fn describe_violations(violations: &[BoundViolation], language: Language) -> String {
    if violations.is_empty() {
        return match language {
            Language::English => FALLBACK_REASON.to_string(),
            Language::Spanish => "condiciones no óptimas".to_string(),
        };
    }
    violations
        .iter()
        .map(|v| v.describe(language))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Score one crop. `optimal_in_cluster` is left false for the caller to set.
pub fn score_crop(profile: &CropProfile, reading: &ClimateReading) -> CropPrediction {
    let viable = is_viable(profile, reading);
    let violations = if viable {
        Vec::new()
    } else {
        viability_violations(profile, reading)
    };
    let non_viability_reason =
        (!viable).then(|| describe_violations(&violations, Language::English));

    CropPrediction {
        crop: profile.crop,
        viable,
        confidence: crop_confidence(profile, reading),
        optimal_in_cluster: false,
        violations,
        non_viability_reason,
    }
}

/// Smallest distance from `reading` to any historical record.
/// Records at a non-finite distance are skipped; `None` when nothing is left.
pub fn min_distance_to_history(reading: &ClimateReading, history: &[ClimateReading]) -> Option<f64> {
    history
        .iter()
        .map(|record| normalized_distance(record, reading))
        .filter(|d| d.is_finite())
        .fold(None, |best: Option<f64>, d| match best {
            Some(b) if b <= d => Some(b),
            _ => Some(d),
        })
}

/// Classifier over a validated pair of cluster and crop tables
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'t> {
    clusters: &'t [ClimateCluster],
    crops: &'t [CropProfile],
}

impl<'t> Classifier<'t> {
    /// Validate the tables once; a classifier never exists over bad tables
    pub fn new(clusters: &'t [ClimateCluster], crops: &'t [CropProfile]) -> EngineResult<Self> {
        validate_cluster_table(clusters)?;
        validate_crop_table(crops)?;
        Ok(Self { clusters, crops })
    }

    /// Classifier over the built-in tables
    pub fn standard() -> EngineResult<Classifier<'static>> {
        Classifier::new(&CLIMATE_CLUSTERS, &CROP_PROFILES)
    }

    pub fn clusters(&self) -> &'t [ClimateCluster] {
        self.clusters
    }

    pub fn crops(&self) -> &'t [CropProfile] {
        self.crops
    }

    /// Nearest cluster for a validated reading
    pub fn assign_cluster(&self, reading: &ClimateReading) -> EngineResult<ClusterAssignment> {
        validate_reading(reading)?;
        Ok(self.nearest(reading))
    }

    // Clusters are ordered by id, so the strict comparison keeps the lowest id on ties.
    fn nearest(&self, reading: &ClimateReading) -> ClusterAssignment {
        let first = &self.clusters[0];
        let (cluster, distance) = self.clusters[1..].iter().fold(
            (first, normalized_distance(&first.centroid, reading)),
            |(best, best_distance), candidate| {
                let distance = normalized_distance(&candidate.centroid, reading);
                if distance < best_distance {
                    (candidate, distance)
                } else {
                    (best, best_distance)
                }
            },
        );

        ClusterAssignment {
            cluster: *cluster,
            distance,
            confidence: cluster_confidence(distance),
        }
    }

    /// Classify a reading, optionally measuring its distance to a history
    pub fn classify(
        &self,
        reading: &ClimateReading,
        history: Option<&[ClimateReading]>,
    ) -> EngineResult<ClassificationResult> {
        validate_reading(reading)?;
        if let Some(records) = history {
            validate_history(records)?;
        }

        let assignment = self.nearest(reading);
        let predictions: Vec<CropPrediction> = self
            .crops
            .iter()
            .map(|profile| CropPrediction {
                optimal_in_cluster: assignment.cluster.is_optimal_for(profile.crop),
                ..score_crop(profile, reading)
            })
            .collect();
        let min_distance_to_history = history.and_then(|h| min_distance_to_history(reading, h));
        let summary = build_summary(&assignment, &predictions, Language::English);

        Ok(ClassificationResult {
            cluster: assignment,
            predictions,
            min_distance_to_history,
            summary,
        })
    }
}

// Every history record must pass the same checks as the reading itself.
fn validate_history(history: &[ClimateReading]) -> EngineResult<()> {
    for (index, record) in history.iter().enumerate() {
        validate_reading(record).map_err(|e| match e {
            ClassificationError::InvalidInput { field, value, reason } => ClassificationError::invalid(
                field,
                value,
                format!("history record {}: {}", index, reason),
            ),
            other => other,
        })?;
    }
    Ok(())
}

/// Classify against the built-in tables
pub fn classify(
    reading: &ClimateReading,
    history: Option<&[ClimateReading]>,
) -> EngineResult<ClassificationResult> {
    Classifier::standard()?.classify(reading, history)
}
