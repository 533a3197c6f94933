//! Application layer - use cases
//!
//! Coordinates a collector and the record repository for one harvest run.

pub mod harvest_use_cases;

// Re-export commonly used items
pub use harvest_use_cases::{HarvestSummary, HarvestUseCases};
