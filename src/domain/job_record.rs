//! Job listing records and their validation
//!
//! `RawJobFields` is what the extractor pulls out of one listing container;
//! `JobRecord` is the validated, immutable form that flows to storage.

use std::fmt;

use thiserror::Error;

/// The five record columns in their canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Title,
    Company,
    Content,
    Location,
    Date,
}

impl JobField {
    /// Column order used by storage and rendering
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Company,
        Self::Content,
        Self::Location,
        Self::Date,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Content => "content",
            Self::Location => "location",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} must not be empty", join_fields(.0))]
    EmptyFields(Vec<JobField>),

    #[error("listing container produced no fields")]
    NoFields,
}

fn join_fields(fields: &[JobField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Field mapping extracted from one listing container, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawJobFields {
    pub title: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl RawJobFields {
    pub fn get(&self, field: JobField) -> Option<&str> {
        match field {
            JobField::Title => self.title.as_deref(),
            JobField::Company => self.company.as_deref(),
            JobField::Content => self.content.as_deref(),
            JobField::Location => self.location.as_deref(),
            JobField::Date => self.date.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        JobField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// A validated job posting.
///
/// Every populated field is non-empty after trimming. Absent fields are
/// `None`, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    title: Option<String>,
    company: Option<String>,
    content: Option<String>,
    location: Option<String>,
    date: Option<String>,
}

impl JobRecord {
    /// Validate raw fields, rejecting a mapping that carries no field at all
    pub fn validate(raw: RawJobFields) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::NoFields);
        }
        Self::validate_allow_empty(raw)
    }

    /// Validate raw fields; a mapping with no fields becomes an all-null record
    pub fn validate_allow_empty(raw: RawJobFields) -> Result<Self, ValidationError> {
        let blank: Vec<JobField> = JobField::ALL
            .into_iter()
            .filter(|f| raw.get(*f).is_some_and(|v| v.trim().is_empty()))
            .collect();

        if !blank.is_empty() {
            return Err(ValidationError::EmptyFields(blank));
        }

        Ok(Self {
            title: raw.title,
            company: raw.company,
            content: raw.content,
            location: raw.location,
            date: raw.date,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn get(&self, field: JobField) -> Option<&str> {
        match field {
            JobField::Title => self.title(),
            JobField::Company => self.company(),
            JobField::Content => self.content(),
            JobField::Location => self.location(),
            JobField::Date => self.date(),
        }
    }
}

impl TryFrom<RawJobFields> for JobRecord {
    type Error = ValidationError;

    fn try_from(raw: RawJobFields) -> Result<Self, Self::Error> {
        Self::validate(raw)
    }
}
