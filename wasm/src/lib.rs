//! WebAssembly module for the crop viability dashboard
//!
//! Provides client-side computation for:
//! - Climate profile assignment and crop scoring
//! - Localized summaries
//! - Offline reading validation

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use shared::{
    render_summary, validate_reading, ClassificationResult, Classifier, ClimateReading, Language,
};

/// Input accepted by the classification functions
#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    reading: ClimateReading,
    #[serde(default)]
    history: Option<Vec<ClimateReading>>,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    #[serde(flatten)]
    result: ClassificationResult,
    summary_es: String,
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop viability engine loaded"));
}

fn classify_request(input_json: &str) -> Result<ClassificationResult, String> {
    let request: ClassifyRequest =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid reading JSON: {}", e))?;
    let classifier = Classifier::standard().map_err(|e| e.to_string())?;
    classifier
        .classify(&request.reading, request.history.as_deref())
        .map_err(|e| e.to_string())
}

fn classify_json(input_json: &str) -> Result<String, String> {
    let result = classify_request(input_json)?;
    let output = ClassifyOutput {
        summary_es: render_summary(&result, Language::Spanish),
        result,
    };
    serde_json::to_string(&output).map_err(|e| e.to_string())
}

fn summary_json(input_json: &str, lang: &str) -> Result<String, String> {
    let language: Language = lang.parse()?;
    let result = classify_request(input_json)?;
    Ok(render_summary(&result, language))
}

fn clusters_json() -> Result<String, String> {
    let classifier = Classifier::standard().map_err(|e| e.to_string())?;
    serde_json::to_string(classifier.clusters()).map_err(|e| e.to_string())
}

fn crops_json() -> Result<String, String> {
    let classifier = Classifier::standard().map_err(|e| e.to_string())?;
    serde_json::to_string(classifier.crops()).map_err(|e| e.to_string())
}

fn reading_problem(reading_json: &str) -> Option<String> {
    match serde_json::from_str::<ClimateReading>(reading_json) {
        Ok(reading) => validate_reading(&reading).err().map(|e| e.to_string()),
        Err(e) => Some(format!("Invalid reading JSON: {}", e)),
    }
}

fn to_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

/// Classify a reading. Takes `{ "reading": {...}, "history": [...] }` and
/// returns the result as JSON with an extra `summary_es` field.
#[wasm_bindgen]
pub fn classify_reading(input_json: &str) -> Result<String, JsValue> {
    to_js(classify_json(input_json))
}

/// Same as [`classify_reading`], parsed into a JavaScript object
#[wasm_bindgen]
pub fn classify_reading_object(input_json: &str) -> Result<JsValue, JsValue> {
    let json = classify_reading(input_json)?;
    js_sys::JSON::parse(&json)
}

/// Summary text for a reading in `lang` ("en" or "es")
#[wasm_bindgen]
pub fn summary_in(input_json: &str, lang: &str) -> Result<String, JsValue> {
    to_js(summary_json(input_json, lang))
}

/// Climate profile table as JSON
#[wasm_bindgen]
pub fn climate_clusters() -> Result<String, JsValue> {
    to_js(clusters_json())
}

/// Crop profile table as JSON
#[wasm_bindgen]
pub fn crop_profiles() -> Result<String, JsValue> {
    to_js(crops_json())
}

/// Validate a bare reading before submitting it; `None` when it is usable
#[wasm_bindgen]
pub fn reading_error(reading_json: &str) -> Option<String> {
    reading_problem(reading_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERATE: &str = r#"{"reading": {"temperature": 26.25, "solar_radiation": 4.89, "soil_moisture": 83.84, "relative_humidity": 83.87, "precipitation": 7.01}}"#;

    #[test]
    fn test_classify_json() {
        let output: serde_json::Value = serde_json::from_str(&classify_json(MODERATE).unwrap()).unwrap();
        assert_eq!(output["cluster"]["cluster"]["id"], 1);
        assert_eq!(output["predictions"].as_array().unwrap().len(), 5);
        assert!(output["summary_es"].as_str().unwrap().starts_with("Perfil: "));
        assert!(output.get("min_distance_to_history").is_none());
    }

    #[test]
    fn test_classify_json_with_history() {
        let input = r#"{
            "reading": {"temperature": 26.0, "solar_radiation": 4.5, "soil_moisture": 78.0, "relative_humidity": 40.0, "precipitation": 0.0},
            "history": [{"temperature": 26.0, "solar_radiation": 4.5, "soil_moisture": 78.0, "relative_humidity": 40.0, "precipitation": 0.0}]
        }"#;
        let output: serde_json::Value = serde_json::from_str(&classify_json(input).unwrap()).unwrap();
        assert_eq!(output["min_distance_to_history"], 0.0);
    }

    #[test]
    fn test_classify_json_errors() {
        assert!(classify_json("not json").unwrap_err().starts_with("Invalid reading JSON"));

        let out_of_range = MODERATE.replace("83.87", "150");
        assert!(classify_json(&out_of_range).unwrap_err().contains("relative_humidity"));
    }

    #[test]
    fn test_classify_json_rejects_bad_history() {
        let input = r#"{
            "reading": {"temperature": 26.0, "solar_radiation": 4.5, "soil_moisture": 78.0, "relative_humidity": 40.0, "precipitation": 0.0},
            "history": [
                {"temperature": 26.0, "solar_radiation": 4.5, "soil_moisture": 78.0, "relative_humidity": 40.0, "precipitation": 0.0},
                {"temperature": 26.0, "solar_radiation": 4.5, "soil_moisture": 78.0, "relative_humidity": 140.0, "precipitation": 0.0}
            ]
        }"#;
        let err = classify_json(input).unwrap_err();
        assert!(err.contains("relative_humidity"));
        assert!(err.contains("history record 1"));
    }

    #[test]
    fn test_summary_languages() {
        assert!(summary_json(MODERATE, "en").unwrap().starts_with("Profile: Moderate Conditions"));
        assert!(summary_json(MODERATE, "es").unwrap().starts_with("Perfil: "));
        assert!(summary_json(MODERATE, "th").is_err());
    }

    #[test]
    fn test_tables() {
        let clusters: serde_json::Value = serde_json::from_str(&clusters_json().unwrap()).unwrap();
        assert_eq!(clusters.as_array().unwrap().len(), 3);

        let crops: serde_json::Value = serde_json::from_str(&crops_json().unwrap()).unwrap();
        assert_eq!(crops[0]["crop"], "tomato");
    }

    #[test]
    fn test_reading_problem() {
        let ok = r#"{"temperature": 26.0, "solar_radiation": 4.5, "soil_moisture": 78.0, "relative_humidity": 80.0, "precipitation": 2.0}"#;
        assert!(reading_problem(ok).is_none());

        let bad = ok.replace("26.0", "99.0");
        assert!(reading_problem(&bad).unwrap().contains("temperature"));
        assert!(reading_problem("{}").is_some());
    }
}
