use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::Result;
use super::json_file::{read_json, write_json_atomic};
use crate::discussion::SubmissionRecord;

/// One submission in the aggregate file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub metadata: Value,
    /// Flattened discussion text.
    pub discussion: String,
}

impl From<&SubmissionRecord> for AggregateEntry {
    fn from(record: &SubmissionRecord) -> Self {
        Self {
            metadata: record.metadata.clone(),
            discussion: record.discussion_flat.clone(),
        }
    }
}

/// Accumulator of processed submissions, keyed by submission id.
///
/// Starts from whatever is already on disk so an interrupted run keeps its
/// progress. Every flush rewrites the whole file atomically, so callers batch
/// inserts with [`Aggregate::flush_if_due`] and [`Aggregate::flush`] once at
/// the end. Entries lost between flushes are recovered from the record files.
#[derive(Debug)]
pub struct Aggregate {
    path: PathBuf,
    entries: BTreeMap<String, AggregateEntry>,
    /// Inserts since the last flush.
    pending: usize,
    flush_interval: usize,
}

impl Aggregate {
    pub(super) fn load(path: PathBuf) -> Result<Self> {
        let entries: BTreeMap<String, AggregateEntry> = read_json(&path)?.unwrap_or_default();
        debug!(path = %path.display(), entries = entries.len(), "loaded aggregate");
        Ok(Self {
            path,
            entries,
            pending: 0,
            flush_interval: 1,
        })
    }

    /// Flush at most once per `interval` inserts (minimum 1).
    pub fn with_flush_interval(mut self, interval: usize) -> Self {
        self.flush_interval = interval.max(1);
        self
    }

    pub fn contains(&self, submission_id: &str) -> bool {
        self.entries.contains_key(submission_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Add or replace the entry for `record`. Nothing is written until a flush.
    pub fn insert_record(&mut self, record: &SubmissionRecord) {
        self.entries
            .insert(record.id.clone(), AggregateEntry::from(record));
        self.pending += 1;
    }

    /// Flush once `flush_interval` inserts have accumulated.
    /// Returns whether the file was written.
    pub fn flush_if_due(&mut self) -> Result<bool> {
        if self.pending < self.flush_interval {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Write the aggregate to disk if it changed since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending == 0 {
            return Ok(());
        }
        write_json_atomic(&self.path, &self.entries)?;
        debug!(path = %self.path.display(), entries = self.entries.len(), flushed = self.pending, "flushed aggregate");
        self.pending = 0;
        Ok(())
    }
}
