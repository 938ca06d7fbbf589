//! HTTP request handlers

pub mod classify;
pub mod clusters;
pub mod health;
pub mod history;
pub mod sensor;

pub use classify::{classify_current, classify_reading};
pub use clusters::{get_cluster, list_clusters, list_crops};
pub use health::health_check;
pub use history::{export_history, history_stats, list_history};
pub use sensor::latest_sensor_reading;
