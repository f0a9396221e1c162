use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::{DiscussionError, Result};
use super::models::{Submission, Threads};
use super::reconstruct::classify_and_group;

/// Persisted form of one processed submission.
///
/// `discussion_flat` is always rendered from `threads`, so both views
/// describe the same discussion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Submission id; the record file is named after it.
    #[serde(skip)]
    pub id: String,
    pub metadata: Value,
    pub discussion_flat: String,
    pub threads: Threads,
}

/// Assemble the structured record and its flattened text rendering.
pub fn serialize_submission(
    submission_id: &str,
    metadata: Value,
    threads: Threads,
) -> SubmissionRecord {
    let discussion_flat = flatten_discussion(&threads);
    debug!(
        submission_id,
        threads = threads.len(),
        entries = threads.entry_count(),
        chars = discussion_flat.len(),
        "serialized discussion"
    );
    SubmissionRecord {
        id: submission_id.to_string(),
        metadata,
        discussion_flat,
        threads,
    }
}

/// Reconstruct and serialize the discussion of one submission.
pub fn process_submission(submission: Submission) -> Result<SubmissionRecord> {
    let id = submission
        .id()
        .ok_or(DiscussionError::MissingSubmissionId)?
        .to_string();
    let Submission {
        mut metadata,
        replies,
    } = submission;

    let threads = classify_and_group(&id, &mut metadata, &replies)?;
    Ok(serialize_submission(&id, metadata, threads))
}

/// Render threads as the tagged plain-text discussion.
///
/// ```text
/// <thread>
/// creation date:
/// 1730000000000
///
/// thread_type:
/// official_review
///
/// <thread_object>
/// creator: reviewer_ab12
///
/// <content>
/// summary:
/// ...
/// </content>
/// </thread_object>
///
/// </thread>
/// ```
pub fn flatten_discussion(threads: &Threads) -> String {
    let mut out = String::new();
    for thread in threads {
        let objects: String = thread
            .content
            .iter()
            .map(|entry| {
                format!(
                    "\n<thread_object>\ncreator: {}\n\n<content>\n{}\n</content>\n</thread_object>\n",
                    entry.writer, entry.content
                )
            })
            .collect();
        out.push_str(&format!(
            "<thread>\ncreation date:\n{}\n\nthread_type:\n{}\n{objects}\n</thread>\n",
            thread.cdate, thread.kind
        ));
    }
    out
}
