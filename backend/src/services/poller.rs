//! Background polling of the station feed

use std::{sync::Arc, time::Duration};

use shared::validate_reading;
use tokio::{sync::RwLock, task::JoinHandle};

use crate::config::SensorConfig;
use crate::error::{AppError, AppResult};
use crate::external::{LiveReading, SensorFeedClient};

/// Latest good reading, shared with the handlers
pub type LiveState = Arc<RwLock<Option<LiveReading>>>;

/// Periodically fetches the feed and keeps the newest valid reading
pub struct SensorPoller {
    client: SensorFeedClient,
    interval: Duration,
    radiation_scale: f64,
    state: LiveState,
}

impl SensorPoller {
    /// Build a poller from configuration, or `None` when no feed is configured
    pub fn from_config(config: &SensorConfig, state: LiveState) -> AppResult<Option<Self>> {
        let Some(feed_url) = config.feed_url.clone() else {
            return Ok(None);
        };
        if config.poll_interval_secs == 0 {
            return Err(AppError::Configuration(
                "sensor.poll_interval_secs must be positive".to_string(),
            ));
        }

        let client = SensorFeedClient::new(feed_url, Duration::from_secs(config.request_timeout_secs))?;
        Ok(Some(Self {
            client,
            interval: Duration::from_secs(config.poll_interval_secs),
            radiation_scale: config.radiation_scale,
            state,
        }))
    }

    /// Fetch once and store the result if it is usable.
    ///
    /// Returns whether the stored reading changed.
    pub async fn poll_once(&self) -> AppResult<bool> {
        let latest = self.client.fetch_latest(self.radiation_scale).await?;
        Ok(store_reading(&self.state, latest).await)
    }

    /// Run forever on a fixed interval
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                "Polling sensor feed {} every {:?}",
                self.client.feed_url(),
                self.interval
            );
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                match self.poll_once().await {
                    Ok(true) => tracing::debug!("Sensor reading updated"),
                    Ok(false) => tracing::debug!("Sensor feed polled, no new reading"),
                    Err(e) => tracing::warn!("Sensor poll failed, keeping last reading: {}", e),
                }
            }
        })
    }
}

/// Replace the stored reading with `latest` when it passes validation.
///
/// An empty feed or an implausible reading leaves the previous one in place.
pub async fn store_reading(state: &LiveState, latest: Option<LiveReading>) -> bool {
    let Some(live) = latest else {
        return false;
    };
    if let Err(e) = validate_reading(&live.reading) {
        tracing::warn!("Discarding sensor record {}: {}", live.record_id, e);
        return false;
    }

    let mut current = state.write().await;
    if current.as_ref().map(|c| (&c.record_id, c.recorded_at)) == Some((&live.record_id, live.recorded_at)) {
        return false;
    }
    *current = Some(live);
    true
}
