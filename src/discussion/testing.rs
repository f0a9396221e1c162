//! Test factories for discussion types.
//!
//! Use `*_with()` variants to customize specific fields.
//!
//! # Example
//! ```ignore
//! use crate::discussion::testing::factories;
//!
//! let reply = factories::reply_with("r1", "SUB", 10, |r| {
//!     r.signatures = vec!["Venue/Submission1/Authors".to_string()];
//! });
//! ```

pub mod factories {
    use serde_json::{Value, json};

    use crate::discussion::models::{ContentFields, Reply, Submission};

    const VENUE: &str = "ICLR.cc/2025/Conference/Submission1";

    /// Convert a JSON object literal into content fields.
    pub fn fields(value: Value) -> ContentFields {
        match value {
            Value::Object(map) => map,
            _ => ContentFields::new(),
        }
    }

    /// Create an official comment by a reviewer.
    pub fn reply(id: &str, replyto: &str, cdate: i64) -> Reply {
        Reply {
            id: id.to_string(),
            replyto: Some(replyto.to_string()),
            writers: vec![VENUE.to_string()],
            signatures: vec![format!("{VENUE}/Reviewer_Ab12")],
            invitations: vec![format!("{VENUE}/-/Official_Comment")],
            cdate,
            content: fields(json!({"comment": {"value": format!("comment {id}")}})),
            extra: Default::default(),
        }
    }

    /// Create a reply with customizations applied via closure.
    pub fn reply_with(id: &str, replyto: &str, cdate: i64, f: impl FnOnce(&mut Reply)) -> Reply {
        let mut r = reply(id, replyto, cdate);
        f(&mut r);
        r
    }

    pub fn review(id: &str, replyto: &str, cdate: i64) -> Reply {
        reply_with(id, replyto, cdate, |r| {
            r.invitations = vec![format!("{VENUE}/-/Official_Review")];
            r.content = fields(json!({
                "summary": {"value": format!("summary of {id}")},
                "rating": {"value": 6},
            }));
        })
    }

    pub fn meta_review(id: &str, replyto: &str, cdate: i64) -> Reply {
        reply_with(id, replyto, cdate, |r| {
            r.signatures = vec![format!("{VENUE}/Area_Chair_Zz9")];
            r.invitations = vec![format!("{VENUE}/-/Meta_Review")];
            r.content = fields(json!({"metareview": {"value": format!("metareview {id}")}}));
        })
    }

    pub fn comment(id: &str, replyto: &str, cdate: i64) -> Reply {
        reply_with(id, replyto, cdate, |r| {
            r.signatures = vec![format!("{VENUE}/Authors")];
        })
    }

    /// Create a decision reply; `None` omits the `decision` field.
    pub fn decision(id: &str, replyto: &str, cdate: i64, verdict: Option<&str>) -> Reply {
        reply_with(id, replyto, cdate, |r| {
            r.signatures = vec!["ICLR.cc/2025/Conference/Program_Chairs".to_string()];
            r.invitations = vec![format!("{VENUE}/-/Decision")];
            r.content = match verdict {
                Some(v) => fields(json!({
                    "title": {"value": "Paper Decision"},
                    "decision": {"value": v},
                })),
                None => fields(json!({"title": {"value": "Paper Decision"}})),
            };
        })
    }

    pub fn submission(id: &str, replies: Vec<Reply>) -> Submission {
        Submission {
            metadata: json!({
                "id": id,
                "forum": id,
                "cdate": 1,
                "content": {"title": {"value": format!("Paper {id}")}},
            }),
            replies,
        }
    }
}
