//! Classification engine tests
//!
//! Tests for crop viability classification including:
//! - Cluster assignment (nearest centroid, lowest id on ties)
//! - Per-crop confidence bounds and monotonicity
//! - Viability gating and non-viability reasons
//! - Determinism and history comparison

use proptest::prelude::*;
use shared::{
    classify, crop_profile, dimension_score, normalized_distance, score_crop, ClassificationError,
    Classifier, ClimateReading, Crop, Language, Range, ReadingField, CLIMATE_CLUSTERS,
    CROP_PROFILES,
};

// Helper to build a reading in field order
fn reading(t: f64, r: f64, s: f64, h: f64, p: f64) -> ClimateReading {
    ClimateReading::new(t, r, s, h, p)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A centroid reading lands on its own cluster with full confidence
    #[test]
    fn test_moderate_centroid_scenario() {
        let result = classify(&reading(26.25, 4.89, 83.84, 83.87, 7.01), None).unwrap();

        assert_eq!(result.cluster.cluster.id, 1);
        assert!(result.cluster.distance.abs() < 1e-9);
        assert!((result.cluster.confidence - 100.0).abs() < 1e-9);
    }

    /// Dry extreme: Tomato fails humidity and rain, Cacao survives
    #[test]
    fn test_dry_extreme_scenario() {
        let result = classify(&reading(26.0, 4.5, 78.0, 40.0, 0.0), None).unwrap();

        let tomato = result.prediction(Crop::Tomato).unwrap();
        assert!(!tomato.viable);
        let reason = tomato.non_viability_reason.as_deref().unwrap();
        assert!(reason.contains("humidity too low"));
        assert!(reason.contains("precipitation too low"));

        assert!(result.prediction(Crop::Cacao).unwrap().viable);
    }

    /// Humidity above 100% is rejected before any classification
    #[test]
    fn test_humidity_out_of_range_rejected() {
        let err = classify(&reading(26.0, 4.5, 78.0, 150.0, 0.0), None).unwrap_err();
        match err {
            ClassificationError::InvalidInput { field, value, .. } => {
                assert_eq!(field, ReadingField::RelativeHumidity);
                assert_eq!(value, 150.0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Non-finite values never reach the distance computation
    #[test]
    fn test_non_finite_rejected() {
        assert!(classify(&reading(f64::NAN, 4.5, 78.0, 80.0, 0.0), None).is_err());
        assert!(classify(&reading(26.0, f64::INFINITY, 78.0, 80.0, 0.0), None).is_err());
    }

    /// Viable with low confidence: Cacao at the edge of every range
    #[test]
    fn test_viable_below_fifty() {
        let profile = crop_profile(Crop::Cacao).unwrap();
        let prediction = score_crop(profile, &reading(21.0, 4.5, 78.0, 40.0, 45.0));
        assert!(prediction.viable);
        assert!(prediction.confidence < 50.0);
    }

    /// Not viable with high confidence: Tomato just short of rain
    #[test]
    fn test_not_viable_above_fifty() {
        let profile = crop_profile(Crop::Tomato).unwrap();
        let prediction = score_crop(profile, &reading(26.0, 4.5, 80.0, 70.0, 0.5));
        assert!(!prediction.viable);
        assert!(prediction.confidence > 50.0);
    }

    /// Temperature, humidity and precipitation weigh 0.35, 0.25 and 0.40
    #[test]
    fn test_score_weights() {
        let profile = crop_profile(Crop::Tomato).unwrap();
        let confidence = |h: f64, p: f64| score_crop(profile, &reading(26.0, 4.5, 80.0, h, p)).confidence;

        // humidity and precipitation both sit on a bound (sub-score 50)
        assert!((confidence(50.0, 15.0) - 67.5).abs() < 1e-9);
        // only precipitation on a bound
        assert!((confidence(70.0, 15.0) - 80.0).abs() < 1e-9);
        // only humidity on a bound
        assert!((confidence(50.0, 8.0) - 87.5).abs() < 1e-9);
        assert!((confidence(70.0, 8.0) - 100.0).abs() < 1e-9);
    }

    /// Humidity only explains non-viability for crops it gates
    #[test]
    fn test_humidity_outside_range_does_not_gate_banana() {
        let profile = crop_profile(Crop::Banana).unwrap();
        let prediction = score_crop(profile, &reading(27.0, 4.5, 80.0, 10.0, 15.0));
        assert!(prediction.viable);
        assert!(prediction.violations.is_empty());
        assert!(prediction.non_viability_reason.is_none());
        assert!(prediction.confidence < 100.0);
    }

    /// Each crop carries its own confidence, distinct from the cluster's
    #[test]
    fn test_confidences_are_per_crop() {
        let result = classify(&reading(25.0, 4.9, 84.0, 84.0, 30.0), None).unwrap();
        let confidences: Vec<f64> = result.predictions.iter().map(|p| p.confidence).collect();

        for (i, a) in confidences.iter().enumerate() {
            for b in &confidences[i + 1..] {
                assert!((a - b).abs() > 1e-6, "shared confidence {}", a);
            }
            assert!((a - result.cluster.confidence).abs() > 1e-6);
        }
    }

    /// Spanish rendering uses the localized labels
    #[test]
    fn test_spanish_summary_render() {
        let result = classify(&reading(26.0, 4.5, 78.0, 40.0, 0.0), None).unwrap();
        let es = shared::render_summary(&result, Language::Spanish);
        assert!(es.starts_with("Perfil: "));
        assert!(es.contains("Cultivos viables: Cacao"));
    }

    /// The built-in tables validate
    #[test]
    fn test_standard_tables_valid() {
        let classifier = Classifier::standard().unwrap();
        assert_eq!(classifier.clusters().len(), 3);
        assert_eq!(classifier.crops().len(), 5);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating plausible station readings
    fn reading_strategy() -> impl Strategy<Value = ClimateReading> {
        (
            5.0f64..45.0,   // temperature °C
            0.0f64..10.0,   // solar radiation
            0.0f64..=100.0, // soil moisture %
            0.0f64..=100.0, // relative humidity %
            0.0f64..120.0,  // precipitation mm
        )
            .prop_map(|(t, r, s, h, p)| reading(t, r, s, h, p))
    }

    /// Strategy for picking a crop profile
    fn crop_strategy() -> impl Strategy<Value = Crop> {
        prop::sample::select(Crop::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every confidence stays within [0, 100]
        #[test]
        fn prop_confidences_bounded(r in reading_strategy()) {
            let result = classify(&r, None).unwrap();
            prop_assert!((0.0..=100.0).contains(&result.cluster.confidence));
            for p in &result.predictions {
                prop_assert!((0.0..=100.0).contains(&p.confidence));
            }
        }

        /// Identical inputs give byte-identical serialized results
        #[test]
        fn prop_deterministic(r in reading_strategy()) {
            let a = serde_json::to_string(&classify(&r, None).unwrap()).unwrap();
            let b = serde_json::to_string(&classify(&r, None).unwrap()).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Non-viable crops always explain themselves
        #[test]
        fn prop_non_viable_has_reason(r in reading_strategy()) {
            let result = classify(&r, None).unwrap();
            for p in result.predictions.iter().filter(|p| !p.viable) {
                prop_assert!(!p.violations.is_empty());
                let reason = p.non_viability_reason.as_deref().unwrap_or("");
                prop_assert!(!reason.is_empty());
                prop_assert!(reason != "conditions not optimal");
            }
            for p in result.predictions.iter().filter(|p| p.viable) {
                prop_assert!(p.non_viability_reason.is_none());
            }
        }

        /// The assigned cluster is no farther than any other centroid
        #[test]
        fn prop_nearest_cluster(r in reading_strategy()) {
            let result = classify(&r, None).unwrap();
            for cluster in CLIMATE_CLUSTERS.iter() {
                let d = normalized_distance(&cluster.centroid, &r);
                prop_assert!(result.cluster.distance <= d);
                if cluster.id < result.cluster.cluster.id {
                    prop_assert!(result.cluster.distance < d);
                }
            }
        }

        /// Viability is closed-range membership on the gating dimensions
        #[test]
        fn prop_viability_matches_ranges(r in reading_strategy(), crop in crop_strategy()) {
            let profile = crop_profile(crop).unwrap();
            let prediction = score_crop(profile, &r);

            let mut expected = profile.temperature.contains(r.temperature)
                && profile.precipitation.contains(r.precipitation);
            if profile.humidity_gates_viability {
                expected = expected && profile.humidity.contains(r.relative_humidity);
            }
            prop_assert_eq!(prediction.viable, expected);
        }

        /// Soil moisture and radiation never change crop predictions
        #[test]
        fn prop_crop_scores_ignore_soil_and_radiation(
            r in reading_strategy(),
            soil in 0.0f64..=100.0,
            radiation in 0.0f64..10.0,
        ) {
            let moved = ClimateReading { soil_moisture: soil, solar_radiation: radiation, ..r };
            for profile in CROP_PROFILES.iter() {
                prop_assert_eq!(score_crop(profile, &r), score_crop(profile, &moved));
            }
        }

        /// Sub-scores fall as the value moves away from the optimum
        #[test]
        fn prop_sub_score_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0, above in any::<bool>()) {
            let range = Range::new(20.0, 32.0, 26.0);
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let at = |f: f64| if above {
                range.optimum + f * (range.max - range.optimum)
            } else {
                range.optimum - f * (range.optimum - range.min)
            };
            prop_assert!(dimension_score(at(near), &range) >= dimension_score(at(far), &range));
        }

        /// A reading present in the history has distance zero to it
        #[test]
        fn prop_history_distance(
            history in prop::collection::vec(reading_strategy(), 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let r = history[pick.index(history.len())];
            let result = classify(&r, Some(&history[..])).unwrap();
            prop_assert_eq!(result.min_distance_to_history, Some(0.0));
        }

        /// Without history, or with an empty one, no distance is reported
        #[test]
        fn prop_no_history_no_distance(r in reading_strategy()) {
            prop_assert!(classify(&r, None).unwrap().min_distance_to_history.is_none());
            prop_assert!(classify(&r, Some(&[][..])).unwrap().min_distance_to_history.is_none());
        }
    }
}
