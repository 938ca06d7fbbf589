//! Configuration management for the crop viability service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CV_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Historical dataset configuration
    pub history: HistoryConfig,

    /// Live sensor feed configuration
    pub sensor: SensorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Path to the historical viability CSV
    pub csv_path: String,

    /// Refuse to start when the CSV cannot be read
    pub required: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    /// Firebase REST endpoint of the station feed; polling is off when unset
    pub feed_url: Option<String>,

    /// Seconds between polls
    pub poll_interval_secs: u64,

    /// HTTP timeout per poll in seconds
    pub request_timeout_secs: u64,

    /// Multiplier turning the feed's UV index into the radiation proxy
    pub radiation_scale: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("history.csv_path", "data/cultivos_viabilidad_FINAL.csv")?
            .set_default("history.required", false)?
            .set_default("sensor.poll_interval_secs", 60)?
            .set_default("sensor.request_timeout_secs", 10)?
            .set_default("sensor.radiation_scale", 0.1)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CV_ prefix)
            .add_source(
                Environment::with_prefix("CV")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            csv_path: "data/cultivos_viabilidad_FINAL.csv".to_string(),
            required: false,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            poll_interval_secs: 60,
            request_timeout_secs: 10,
            radiation_scale: 0.1,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            history: HistoryConfig::default(),
            sensor: SensorConfig::default(),
        }
    }
}
