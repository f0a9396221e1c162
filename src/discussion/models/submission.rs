use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Reply;

/// A submission together with every reply posted in its forum.
///
/// `metadata` is the submission note itself (id, content, cdate, ...) and is
/// kept as loosely typed JSON since it is written back out unchanged apart
/// from the merged decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub metadata: Value,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Submission {
    pub fn id(&self) -> Option<&str> {
        self.metadata.get("id").and_then(Value::as_str)
    }
}
