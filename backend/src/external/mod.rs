//! External API integrations

pub mod sensor;

pub use sensor::{LiveReading, SensorFeedClient};
