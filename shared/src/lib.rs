//! Crop viability engine shared by the backend and the browser (via WASM)
//!
//! Classifies a climate reading into one of three climate profiles and scores
//! five crops against hand-tuned viability ranges. Pure computation: no I/O,
//! no shared mutable state.

pub mod classifier;
pub mod error;
pub mod models;
pub mod summary;
pub mod types;
pub mod validation;

pub use classifier::*;
pub use error::*;
pub use models::*;
pub use summary::*;
pub use types::*;
pub use validation::*;
