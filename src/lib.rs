//! job-harvest - job listing extraction into Parquet
//!
//! Collects job postings from a local tree of HTML pages or from a remote
//! listing site, validates them and stores them as a five-column table.

// Module declarations
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export the types most callers need
pub use application::{HarvestSummary, HarvestUseCases};
pub use domain::{JobField, JobRecord, RawJobFields, ValidationError};
