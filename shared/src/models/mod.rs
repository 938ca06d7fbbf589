//! Domain models for the crop viability engine

mod cluster;
mod crop;
mod prediction;
mod reading;
mod stats;

pub use cluster::*;
pub use crop::*;
pub use prediction::*;
pub use reading::*;
pub use stats::*;
