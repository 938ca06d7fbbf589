//! Classification service wrapping the engine with history and live readings

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{render_summary, ClassificationResult, Classifier, ClimateReading, Language};

use crate::error::{AppError, AppResult};
use crate::services::history::HistoryStore;
use crate::services::poller::LiveState;

/// Classification service
#[derive(Clone)]
pub struct ClassificationService {
    classifier: Classifier<'static>,
    history: Arc<HistoryStore>,
    live: LiveState,
}

/// Input for classifying a reading
#[derive(Debug, Deserialize)]
pub struct ClassifyInput {
    pub reading: ClimateReading,
    /// Compare against the historical dataset (default true)
    pub compare_history: Option<bool>,
}

/// Engine result plus the Spanish summary
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResponse {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub summary_es: String,
    pub generated_at: DateTime<Utc>,
}

/// Where the "current" reading came from
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadingSource {
    Live {
        record_id: String,
        recorded_at: DateTime<Utc>,
    },
    Historical {
        date: String,
    },
}

/// Classification of the current conditions
#[derive(Debug, Clone, Serialize)]
pub struct CurrentClassification {
    pub source: ReadingSource,
    pub reading: ClimateReading,
    pub classification: ClassificationResponse,
}

impl ClassificationService {
    pub fn new(classifier: Classifier<'static>, history: Arc<HistoryStore>, live: LiveState) -> Self {
        Self {
            classifier,
            history,
            live,
        }
    }

    /// Classify one reading
    pub fn classify(&self, reading: &ClimateReading, compare_history: bool) -> AppResult<ClassificationResponse> {
        let history = if compare_history {
            Some(self.history.readings())
        } else {
            None
        };

        let result = self.classifier.classify(reading, history)?;
        tracing::debug!(
            cluster = result.cluster.cluster.id,
            distance = result.cluster.distance,
            viable = result.viable_crops().count(),
            "Classified reading"
        );

        Ok(ClassificationResponse {
            summary_es: render_summary(&result, Language::Spanish),
            result,
            generated_at: Utc::now(),
        })
    }

    /// Latest live reading, or the last historical row when no feed data exists
    pub async fn current_reading(&self) -> AppResult<(ReadingSource, ClimateReading)> {
        if let Some(live) = self.live.read().await.as_ref() {
            return Ok((
                ReadingSource::Live {
                    record_id: live.record_id.clone(),
                    recorded_at: live.recorded_at,
                },
                live.reading,
            ));
        }

        self.history
            .last()
            .map(|record| {
                (
                    ReadingSource::Historical {
                        date: record.date.clone(),
                    },
                    record.reading,
                )
            })
            .ok_or(AppError::SensorUnavailable)
    }

    /// Classify the current conditions
    pub async fn classify_current(&self) -> AppResult<CurrentClassification> {
        let (source, reading) = self.current_reading().await?;
        let classification = self.classify(&reading, true)?;

        Ok(CurrentClassification {
            source,
            reading,
            classification,
        })
    }
}
