//! Human-readable classification summaries

use crate::classifier::describe_violations;
use crate::models::{ClassificationResult, ClusterAssignment, CropPrediction};
use crate::types::Language;

/// Most non-viability reasons listed when nothing is viable
pub const MAX_SUMMARY_REASONS: usize = 3;

/// Build the summary text for an assignment and its predictions.
///
/// Every viable crop is listed with its own confidence. Crops that are both
/// viable and optimal for the profile get a separate recommendation line.
pub fn build_summary(
    assignment: &ClusterAssignment,
    predictions: &[CropPrediction],
    language: Language,
) -> String {
    let name = assignment.cluster.localized_name(language);
    let mut lines = vec![match language {
        Language::English => format!("Profile: {} ({:.0}% confidence)", name, assignment.confidence),
        Language::Spanish => format!("Perfil: {} ({:.0}% confianza)", name, assignment.confidence),
    }];

    let viable: Vec<&CropPrediction> = predictions.iter().filter(|p| p.viable).collect();

    if viable.is_empty() {
        lines.push(
            match language {
                Language::English => "No crop is viable under current conditions.",
                Language::Spanish => "Ningún cultivo es viable con las condiciones actuales.",
            }
            .to_string(),
        );
        let reasons: Vec<String> = predictions
            .iter()
            .filter(|p| !p.viable)
            .take(MAX_SUMMARY_REASONS)
            .map(|p| {
                format!(
                    "  - {}: {}",
                    p.crop.name(language),
                    describe_violations(&p.violations, language)
                )
            })
            .collect();
        if !reasons.is_empty() {
            lines.push(
                match language {
                    Language::English => "Reasons:",
                    Language::Spanish => "Razones:",
                }
                .to_string(),
            );
            lines.extend(reasons);
        }
    } else {
        let listed = viable
            .iter()
            .map(|p| format!("{} ({:.0}%)", p.crop.name(language), p.confidence))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(match language {
            Language::English => format!("Viable crops: {}", listed),
            Language::Spanish => format!("Cultivos viables: {}", listed),
        });

        let recommended: Vec<&str> = viable
            .iter()
            .filter(|p| p.optimal_in_cluster)
            .map(|p| p.crop.name(language))
            .collect();
        if !recommended.is_empty() {
            lines.push(match language {
                Language::English => format!("Recommended for this profile: {}", recommended.join(", ")),
                Language::Spanish => format!("Recomendados para este perfil: {}", recommended.join(", ")),
            });
        }
    }

    let mut summary = lines.join("\n");
    summary.push('\n');
    summary
}

/// Render an existing result's summary in another language
pub fn render_summary(result: &ClassificationResult, language: Language) -> String {
    build_summary(&result.cluster, &result.predictions, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::models::{ClimateReading, Crop};

    #[test]
    fn test_summary_lists_each_viable_crop_with_own_confidence() {
        let result = classify(&ClimateReading::new(26.25, 4.89, 83.84, 83.87, 7.01), None).unwrap();
        let summary = &result.summary;

        assert!(summary.starts_with("Profile: Moderate Conditions (100% confidence)\n"));
        for p in result.viable_crops() {
            let expected = format!("{} ({:.0}%)", p.crop, p.confidence);
            assert!(summary.contains(&expected), "missing {} in {}", expected, summary);
        }
        assert!(summary.contains("Recommended for this profile: Banana, Cacao"));
    }

    #[test]
    fn test_summary_recommends_only_viable_optimal_crops() {
        // Dry conditions profile favours Maize, Rice and Cacao; only Cacao survives zero rain.
        let result = classify(&ClimateReading::new(26.0, 4.5, 78.0, 40.0, 0.0), None).unwrap();
        assert_eq!(result.cluster.cluster.id, 2);
        let viable: Vec<Crop> = result.viable_crops().map(|p| p.crop).collect();
        assert_eq!(viable, vec![Crop::Cacao]);
        assert!(result.summary.contains("Recommended for this profile: Cacao\n"));
        assert!(!result.summary.contains("Maize ("));
    }

    #[test]
    fn test_summary_without_viable_crops_lists_three_reasons() {
        let result = classify(&ClimateReading::new(10.0, 1.0, 20.0, 20.0, 300.0), None).unwrap();
        assert_eq!(result.viable_crops().count(), 0);

        let summary = &result.summary;
        assert!(summary.contains("No crop is viable under current conditions."));
        assert!(summary.contains("Reasons:"));
        assert_eq!(summary.matches("  - ").count(), MAX_SUMMARY_REASONS);
        assert!(summary.contains("  - Tomato: temperature too low (10°C < 20°C)"));
        assert!(summary.contains("  - Cacao: "));
        assert!(!summary.contains("  - Rice: "));
    }

    #[test]
    fn test_spanish_summary() {
        let result = classify(&ClimateReading::new(10.0, 1.0, 20.0, 20.0, 300.0), None).unwrap();
        let summary = render_summary(&result, Language::Spanish);
        assert!(summary.starts_with("Perfil: "));
        assert!(summary.contains("Ningún cultivo es viable"));
        assert!(summary.contains("  - Tomate: temp. muy baja (10°C < 20°C)"));
    }

    #[test]
    fn test_render_english_matches_stored_summary() {
        let result = classify(&ClimateReading::new(25.0, 4.9, 84.0, 84.0, 30.0), None).unwrap();
        assert_eq!(render_summary(&result, Language::English), result.summary);
    }
}
