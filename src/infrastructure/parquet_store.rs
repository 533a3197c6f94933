//! Parquet storage for job records
//!
//! One row per record, one nullable UTF-8 column per field, in
//! `JobField::ALL` order. Every save replaces the whole file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use async_trait::async_trait;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::errors::ParquetError;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::job_record::{JobField, JobRecord, RawJobFields};
use crate::domain::repositories::JobRecordRepository;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Column '{0}' missing from stored table")]
    MissingColumn(JobField),

    #[error("Column '{column}' has type {found}, expected Utf8")]
    UnexpectedColumnType { column: JobField, found: DataType },

    #[error("Stored row is not a valid record: {0}")]
    InvalidRow(#[from] crate::domain::ValidationError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Arrow schema of the stored table
pub fn job_schema() -> SchemaRef {
    Arc::new(Schema::new(
        JobField::ALL
            .iter()
            .map(|f| Field::new(f.as_str(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ))
}

/// Parquet-backed record repository
pub struct ParquetJobStore {
    path: PathBuf,
}

impl ParquetJobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn to_batch(records: &[JobRecord]) -> StorageResult<RecordBatch> {
        let columns: Vec<ArrayRef> = JobField::ALL
            .iter()
            .map(|field| {
                let values: StringArray = records.iter().map(|r| r.get(*field)).collect();
                Arc::new(values) as ArrayRef
            })
            .collect();

        Ok(RecordBatch::try_new(job_schema(), columns)?)
    }

    /// Write `records`, creating or truncating the file
    pub fn write_records(&self, records: &[JobRecord]) -> StorageResult<()> {
        let batch = Self::to_batch(records)?;

        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = ArrowWriter::try_new(file, job_schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;

        debug!("Wrote {} rows to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Read every stored batch along with the file's schema
    pub fn read_batches(&self) -> StorageResult<(SchemaRef, Vec<RecordBatch>)> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let schema = builder.schema().clone();
        let reader = builder.build()?;

        let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
        Ok((schema, batches))
    }

    fn string_column<'a>(batch: &'a RecordBatch, field: JobField) -> StorageResult<&'a StringArray> {
        let column = batch
            .column_by_name(field.as_str())
            .ok_or(StorageError::MissingColumn(field))?;

        column
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| StorageError::UnexpectedColumnType {
                column: field,
                found: column.data_type().clone(),
            })
    }

    fn check_schema(schema: &Schema) -> StorageResult<()> {
        for field in JobField::ALL {
            let stored = schema
                .field_with_name(field.as_str())
                .map_err(|_| StorageError::MissingColumn(field))?;
            if stored.data_type() != &DataType::Utf8 {
                return Err(StorageError::UnexpectedColumnType {
                    column: field,
                    found: stored.data_type().clone(),
                });
            }
        }
        Ok(())
    }

    /// Read the stored rows back into records
    pub fn read_records(&self) -> StorageResult<Vec<JobRecord>> {
        let (schema, batches) = self.read_batches()?;
        Self::check_schema(&schema)?;

        let mut records = Vec::new();
        for batch in &batches {
            let [title, company, content, location, date] =
                JobField::ALL.map(|f| Self::string_column(batch, f));
            let (title, company, content, location, date) =
                (title?, company?, content?, location?, date?);

            let cell = |array: &StringArray, row: usize| {
                (!array.is_null(row)).then(|| array.value(row).to_string())
            };

            for row in 0..batch.num_rows() {
                let raw = RawJobFields {
                    title: cell(title, row),
                    company: cell(company, row),
                    content: cell(content, row),
                    location: cell(location, row),
                    date: cell(date, row),
                };
                records.push(JobRecord::validate_allow_empty(raw)?);
            }
        }

        Ok(records)
    }

    /// Render the whole table, every row and column, untruncated
    pub fn render_table(&self) -> StorageResult<String> {
        let (schema, mut batches) = self.read_batches()?;
        if batches.is_empty() {
            batches.push(RecordBatch::new_empty(schema));
        }
        Ok(pretty_format_batches(&batches)?.to_string())
    }
}

#[async_trait]
impl JobRecordRepository for ParquetJobStore {
    async fn save_all(&self, records: &[JobRecord]) -> Result<()> {
        self.write_records(records)?;
        info!("Data saved to {}", self.path.display());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<JobRecord>> {
        Ok(self.read_records()?)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
