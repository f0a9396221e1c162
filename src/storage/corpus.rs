use std::path::PathBuf;

use tracing::debug;

use super::aggregate::Aggregate;
use super::error::Result;
use super::json_file::{read_json, write_json_atomic};
use super::paths::CorpusPaths;
use crate::discussion::{Submission, SubmissionRecord};

/// Filesystem store for one venue's raw cache, records and aggregate.
#[derive(Debug, Clone)]
pub struct CorpusStorage {
    paths: CorpusPaths,
}

impl CorpusStorage {
    pub fn new(data_dir: impl Into<PathBuf>, venue: impl Into<String>) -> Self {
        Self {
            paths: CorpusPaths::new(data_dir, venue),
        }
    }

    pub fn paths(&self) -> &CorpusPaths {
        &self.paths
    }

    /// Cached submissions from a previous fetch, if any.
    pub fn load_raw(&self) -> Result<Option<Vec<Submission>>> {
        read_json(&self.paths.raw_cache())
    }

    pub fn save_raw(&self, submissions: &[Submission]) -> Result<()> {
        let path = self.paths.raw_cache();
        write_json_atomic(&path, submissions)?;
        debug!(path = %path.display(), count = submissions.len(), "saved raw cache");
        Ok(())
    }

    pub fn has_record(&self, submission_id: &str) -> Result<bool> {
        Ok(self.paths.record(submission_id)?.is_file())
    }

    pub fn write_record(&self, record: &SubmissionRecord) -> Result<PathBuf> {
        let path = self.paths.record(&record.id)?;
        write_json_atomic(&path, record)?;
        Ok(path)
    }

    /// Load a previously written record. `Ok(None)` if it does not exist.
    pub fn read_record(&self, submission_id: &str) -> Result<Option<SubmissionRecord>> {
        let path = self.paths.record(submission_id)?;
        let record: Option<SubmissionRecord> = read_json(&path)?;
        Ok(record.map(|mut record| {
            record.id = submission_id.to_string();
            record
        }))
    }

    pub fn load_aggregate(&self) -> Result<Aggregate> {
        Aggregate::load(self.paths.aggregate())
    }
}
