//! Weather station feed client
//!
//! The station pushes readings into a Firebase Realtime Database. Its REST
//! endpoint returns a JSON object keyed by record id; the newest record is
//! the current reading.

use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::ClimateReading;

use crate::error::{AppError, AppResult};

/// Station feed client
#[derive(Clone)]
pub struct SensorFeedClient {
    client: Client,
    feed_url: String,
}

/// Latest reading taken from the feed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LiveReading {
    pub record_id: String,
    pub recorded_at: DateTime<Utc>,
    pub reading: ClimateReading,
    pub fetched_at: DateTime<Utc>,
}

/// One record as the station writes it
#[derive(Debug, Deserialize)]
struct RawSensorRecord {
    temperatura: f64,
    humedad: f64,
    humedad_suelo: f64,
    lluvia: f64,
    #[serde(rename = "uvIndex")]
    uv_index: f64,
    timestamp: FeedTimestamp,
}

/// Older firmware writes epoch milliseconds, newer writes a date string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedTimestamp {
    Millis(f64),
    Text(String),
}

impl FeedTimestamp {
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            FeedTimestamp::Millis(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
            FeedTimestamp::Millis(_) => None,
            FeedTimestamp::Text(text) => parse_timestamp_text(text),
        }
    }
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    text.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

impl RawSensorRecord {
    fn into_reading(self, radiation_scale: f64) -> Option<(DateTime<Utc>, ClimateReading)> {
        let recorded_at = self.timestamp.to_utc()?;
        let reading = ClimateReading {
            temperature: self.temperatura,
            solar_radiation: self.uv_index * radiation_scale,
            soil_moisture: self.humedad_suelo,
            relative_humidity: self.humedad,
            precipitation: self.lluvia,
        };
        Some((recorded_at, reading))
    }
}

impl SensorFeedClient {
    /// Create a new SensorFeedClient
    pub fn new(feed_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Sensor HTTP client: {}", e)))?;

        Ok(Self { client, feed_url })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch every record currently in the feed
    pub async fn fetch_records(&self) -> AppResult<HashMap<String, Value>> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| AppError::SensorFeed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SensorFeed(format!("{} - {}", status, body)));
        }

        // An empty Firebase node comes back as `null`
        let records: Option<HashMap<String, Value>> = response
            .json()
            .await
            .map_err(|e| AppError::SensorFeed(format!("Failed to parse feed response: {}", e)))?;

        Ok(records.unwrap_or_default())
    }

    /// Fetch the feed and pick its newest usable record
    pub async fn fetch_latest(&self, radiation_scale: f64) -> AppResult<Option<LiveReading>> {
        let records = self.fetch_records().await?;
        Ok(latest_reading(records, radiation_scale, Utc::now()))
    }
}

/// Newest record by timestamp; equal timestamps go to the greater record id.
///
/// Records with a missing field or an unreadable timestamp are skipped.
pub fn latest_reading(
    records: HashMap<String, Value>,
    radiation_scale: f64,
    fetched_at: DateTime<Utc>,
) -> Option<LiveReading> {
    records
        .into_iter()
        .filter_map(|(id, value)| {
            let raw: RawSensorRecord = serde_json::from_value(value).ok()?;
            let (recorded_at, reading) = raw.into_reading(radiation_scale)?;
            Some((recorded_at, id, reading))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(recorded_at, record_id, reading)| LiveReading {
            record_id,
            recorded_at,
            reading,
            fetched_at,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn feed(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_latest_by_timestamp() {
        let records = feed(json!({
            "-Nb1": {"temperatura": 24.0, "humedad": 80.0, "humedad_suelo": 70.0, "lluvia": 2.0, "uvIndex": 30.0, "timestamp": 1717236000000i64},
            "-Na9": {"temperatura": 27.5, "humedad": 82.0, "humedad_suelo": 75.0, "lluvia": 0.0, "uvIndex": 48.0, "timestamp": "2024-06-01 11:30:00"},
            "-Nb0": {"temperatura": 22.0, "humedad": 90.0, "humedad_suelo": 60.0, "lluvia": 5.0, "uvIndex": 10.0, "timestamp": "2024-05-31T23:00:00Z"}
        }));

        let live = latest_reading(records, 0.1, now()).unwrap();
        assert_eq!(live.record_id, "-Na9");
        assert_eq!(live.recorded_at, Utc.with_ymd_and_hms(2024, 6, 1, 11, 30, 0).unwrap());
        assert_eq!(live.reading.temperature, 27.5);
        assert_eq!(live.reading.relative_humidity, 82.0);
        assert_eq!(live.reading.soil_moisture, 75.0);
        assert_eq!(live.reading.precipitation, 0.0);
        assert!((live.reading.solar_radiation - 4.8).abs() < 1e-9);
        assert_eq!(live.fetched_at, now());
    }

    #[test]
    fn test_equal_timestamps_pick_greater_key() {
        let records = feed(json!({
            "a": {"temperatura": 20.0, "humedad": 80.0, "humedad_suelo": 70.0, "lluvia": 2.0, "uvIndex": 30.0, "timestamp": "2024-06-01T10:00:00Z"},
            "b": {"temperatura": 21.0, "humedad": 80.0, "humedad_suelo": 70.0, "lluvia": 2.0, "uvIndex": 30.0, "timestamp": "2024-06-01T10:00:00Z"}
        }));
        assert_eq!(latest_reading(records, 0.1, now()).unwrap().record_id, "b");
    }

    #[test]
    fn test_incomplete_records_are_skipped() {
        let records = feed(json!({
            "newest_but_broken": {"temperatura": 30.0, "humedad": 80.0, "lluvia": 2.0, "uvIndex": 30.0, "timestamp": "2024-06-01T11:59:00Z"},
            "bad_time": {"temperatura": 30.0, "humedad": 80.0, "humedad_suelo": 70.0, "lluvia": 2.0, "uvIndex": 30.0, "timestamp": "yesterday"},
            "ok": {"temperatura": 25.0, "humedad": 80.0, "humedad_suelo": 70.0, "lluvia": 2.0, "uvIndex": 30.0, "timestamp": "2024-06-01T09:00:00Z"}
        }));
        assert_eq!(latest_reading(records, 0.1, now()).unwrap().record_id, "ok");
    }

    #[test]
    fn test_radiation_scale_applies() {
        let records = feed(json!({
            "x": {"temperatura": 25.0, "humedad": 80.0, "humedad_suelo": 70.0, "lluvia": 2.0, "uvIndex": 45.0, "timestamp": 1717236000000i64}
        }));
        let live = latest_reading(records, 1.0, now()).unwrap();
        assert_eq!(live.reading.solar_radiation, 45.0);
    }

    #[test]
    fn test_empty_feed() {
        assert!(latest_reading(HashMap::new(), 0.1, now()).is_none());
    }

    #[test]
    fn test_parse_timestamp_text() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 8, 15, 0).unwrap();
        assert_eq!(parse_timestamp_text("2024-06-01 08:15:00"), Some(expected));
        assert_eq!(parse_timestamp_text("2024-06-01T03:15:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp_text(&expected.timestamp_millis().to_string()), Some(expected));
        assert_eq!(parse_timestamp_text("01/06/2024"), None);
    }
}
