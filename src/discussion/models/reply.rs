use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named content fields of a note, e.g. `{"summary": {"value": "..."}}`.
pub type ContentFields = Map<String, Value>;

/// A single discussion contribution as served by the review platform.
///
/// Only the fields the thread reconstruction needs are typed; everything else
/// is carried through `extra` so the raw cache stays faithful to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    /// Identifier of the note this reply answers: another reply or the submission.
    #[serde(default)]
    pub replyto: Option<String>,
    #[serde(default)]
    pub writers: Vec<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub invitations: Vec<String>,
    /// Creation time in epoch milliseconds.
    pub cdate: i64,
    #[serde(default)]
    pub content: ContentFields,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reply {
    /// Role of the author, e.g. `reviewer_x1y2` for
    /// `ICLR.cc/2025/Conference/Submission1/Reviewer_x1Y2`.
    pub fn writer_role(&self) -> String {
        self.signatures
            .first()
            .map(|s| last_segment(s).to_lowercase())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Category derived from the invitation, e.g. `official_review` for
    /// `ICLR.cc/2025/Conference/Submission1/-/Official_Review`.
    pub fn category(&self) -> ReplyCategory {
        self.invitations
            .first()
            .map(|i| ReplyCategory::new(last_segment(i)))
            .unwrap_or_else(|| ReplyCategory::new("unknown"))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extract the text of a content field payload.
///
/// Payloads are normally `{"value": ...}` objects; a bare scalar is accepted
/// as well. Null or value-less payloads count as absent.
pub fn field_text(payload: &Value) -> Option<String> {
    let value = match payload {
        Value::Object(map) => map.get("value")?,
        other => other,
    };
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Lower-cased reply category (`official_review`, `meta_review`, `decision`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyCategory(String);

impl ReplyCategory {
    pub const DECISION: &'static str = "decision";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decision replies carry the verdict and never start a thread.
    pub fn is_decision(&self) -> bool {
        self.0 == Self::DECISION
    }
}

impl fmt::Display for ReplyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
