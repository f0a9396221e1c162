use std::path::PathBuf;

use super::error::{Result, StorageError};

/// File layout of one venue's corpus under the data directory.
///
/// ```text
/// <root>/
///   <venue>_raw.json       fetched submissions with their replies
///   <venue>_dataset.json   aggregate of all processed submissions
///   reviews/<id>.json      one record per submission
/// ```
#[derive(Debug, Clone)]
pub struct CorpusPaths {
    root: PathBuf,
    venue: String,
}

impl CorpusPaths {
    pub fn new(root: impl Into<PathBuf>, venue: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            venue: venue.into(),
        }
    }

    pub fn raw_cache(&self) -> PathBuf {
        self.root.join(format!("{}_raw.json", self.venue))
    }

    pub fn aggregate(&self) -> PathBuf {
        self.root.join(format!("{}_dataset.json", self.venue))
    }

    pub fn records_dir(&self) -> PathBuf {
        self.root.join("reviews")
    }

    /// Path of the record file for `submission_id`.
    ///
    /// Ids that would escape `records_dir` are rejected.
    pub fn record(&self, submission_id: &str) -> Result<PathBuf> {
        if submission_id.is_empty()
            || submission_id.contains(['/', '\\'])
            || submission_id.starts_with('.')
        {
            return Err(StorageError::InvalidId(submission_id.to_string()));
        }
        Ok(self.records_dir().join(format!("{submission_id}.json")))
    }
}
