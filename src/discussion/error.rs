use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscussionError {
    /// The parent chain of a reply loops instead of reaching the submission.
    #[error(
        "Malformed thread graph in submission {submission_id}: parent chain of reply {reply_id} does not terminate"
    )]
    MalformedThreadGraph {
        submission_id: String,
        reply_id: String,
    },

    #[error("Submission metadata has no string `id` field")]
    MissingSubmissionId,
}

pub type Result<T> = std::result::Result<T, DiscussionError>;
