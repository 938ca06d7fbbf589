//! Business logic services for the crop viability service

pub mod classification;
pub mod history;
pub mod poller;

pub use classification::ClassificationService;
pub use history::HistoryStore;
pub use poller::{LiveState, SensorPoller};
