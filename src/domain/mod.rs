//! Domain module - Core entities and the seams between components
//!
//! This module contains the job record entity, its validation rules,
//! and the traits the collectors and storage are built against.

pub mod job_record;
pub mod repositories;
pub mod services;

// Re-export commonly used items
pub use job_record::{JobField, JobRecord, RawJobFields, ValidationError};
pub use repositories::JobRecordRepository;
pub use services::{JobCollector, PageFetcher, RecordExtractor};
