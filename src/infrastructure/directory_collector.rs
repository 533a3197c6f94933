//! Directory collector
//!
//! Walks a local directory tree and runs every `.html` file through the
//! shared record extractor. Files of a directory are visited before its
//! subdirectories, each group sorted by name. Directory symlinks are not
//! followed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::job_record::JobRecord;
use crate::domain::services::{JobCollector, RecordExtractor};

/// Literal, case-sensitive file name suffix of job pages
pub const HTML_SUFFIX: &str = ".html";

pub struct DirectoryCollector {
    root: PathBuf,
    extractor: Arc<dyn RecordExtractor>,
}

impl DirectoryCollector {
    pub fn new(root: impl Into<PathBuf>, extractor: Arc<dyn RecordExtractor>) -> Self {
        Self {
            root: root.into(),
            extractor,
        }
    }

    /// Every `.html` file under the root, in traversal order
    pub fn find_html_files(&self) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(&self.root)
            .with_context(|| format!("Cannot access job directory {}", self.root.display()))?;
        if !metadata.is_dir() {
            bail!("Job directory {} is not a directory", self.root.display());
        }

        let mut files = Vec::new();
        Self::walk(&self.root, &mut files);
        Ok(files)
    }

    fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };

        let mut dir_files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            // file_type() does not follow symlinks; a symlink to a file is
            // still read as a file below
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => subdirs.push(path),
                Ok(ft) if ft.is_symlink() => {
                    if path.is_file() {
                        dir_files.push(path);
                    }
                }
                Ok(_) => dir_files.push(path),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        dir_files.sort();
        subdirs.sort();

        files.extend(dir_files.into_iter().filter(|p| is_html_file(p)));
        for subdir in subdirs {
            Self::walk(&subdir, files);
        }
    }

    /// Extract records from one file; unreadable files contribute nothing
    fn collect_file(&self, path: &Path) -> Vec<JobRecord> {
        let source = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(html) => {
                let records = self.extractor.extract_records(&html, &source);
                debug!("{} records from {}", records.len(), source);
                records
            }
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", source, e);
                Vec::new()
            }
        }
    }

    /// Synchronous body of `collect`
    pub fn collect_all(&self) -> Result<Vec<JobRecord>> {
        let files = self.find_html_files()?;
        info!(
            "Found {} HTML files under {}",
            files.len(),
            self.root.display()
        );

        let records: Vec<JobRecord> = files
            .iter()
            .flat_map(|path| self.collect_file(path))
            .collect();

        info!("Collected {} records from {}", records.len(), self.root.display());
        Ok(records)
    }
}

#[async_trait]
impl JobCollector for DirectoryCollector {
    async fn collect(&self) -> Result<Vec<JobRecord>> {
        self.collect_all()
    }
}

/// Suffix match on the raw name, so names that are not valid UTF-8 still count
fn is_html_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(HTML_SUFFIX.as_bytes()))
}
