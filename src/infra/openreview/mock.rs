//! wiremock-based OpenReview mock server for testing.
//!
//! ```ignore
//! let mock = OpenReviewMockServer::start().await;
//! mock.notes_page(INVITATION, 0, vec![mock_note("SUB", &[("r1", "SUB", 10)])], Some(1)).await;
//! let submissions = mock.client(100).fetch_submissions(INVITATION).await?;
//! ```

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::OpenReviewClient;
use crate::shared::config::ApiConfig;

/// Create a submission note with `details.replies`.
///
/// Each reply is `(id, replyto, cdate)` and is posted as an official review.
pub fn mock_note(id: &str, replies: &[(&str, &str, i64)]) -> Value {
    let replies: Vec<Value> = replies
        .iter()
        .map(|(reply_id, replyto, cdate)| {
            json!({
                "id": reply_id,
                "forum": id,
                "replyto": replyto,
                "cdate": cdate,
                "writers": [format!("Venue/Submission_{id}")],
                "signatures": [format!("Venue/Submission_{id}/Reviewer_X")],
                "invitations": [format!("Venue/Submission_{id}/-/Official_Review")],
                "content": {"summary": {"value": format!("review {reply_id}")}}
            })
        })
        .collect();

    json!({
        "id": id,
        "forum": id,
        "cdate": 1,
        "content": {"title": {"value": format!("Paper {id}")}},
        "details": {"replies": replies}
    })
}

pub struct OpenReviewMockServer {
    server: MockServer,
}

impl OpenReviewMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    fn config(&self, page_size: usize, token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: self.server.uri(),
            page_size,
            timeout_secs: 5,
            token: token.map(str::to_string),
        }
    }

    /// Client pointed at this server.
    pub fn client(&self, page_size: usize) -> OpenReviewClient {
        OpenReviewClient::new(&self.config(page_size, None)).unwrap()
    }

    pub fn client_with_token(&self, page_size: usize, token: &str) -> OpenReviewClient {
        OpenReviewClient::new(&self.config(page_size, Some(token))).unwrap()
    }

    /// Mock `GET /notes` for one page starting at `offset`.
    pub async fn notes_page(
        &self,
        invitation: &str,
        offset: usize,
        notes: Vec<Value>,
        count: Option<usize>,
    ) {
        let mut body = json!({"notes": notes});
        if let Some(count) = count {
            body["count"] = json!(count);
        }
        Mock::given(method("GET"))
            .and(path("/notes"))
            .and(query_param("invitation", invitation))
            .and(query_param("details", "replies"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Like `notes_page`, but only matches requests carrying the bearer token.
    pub async fn notes_page_with_token(
        &self,
        invitation: &str,
        offset: usize,
        token: &str,
        notes: Vec<Value>,
    ) {
        let count = notes.len();
        Mock::given(method("GET"))
            .and(path("/notes"))
            .and(query_param("invitation", invitation))
            .and(query_param("offset", offset.to_string()))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"notes": notes, "count": count})),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock `GET /notes` failing with a JSON error body.
    pub async fn notes_error(&self, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock `GET /notes` with an arbitrary raw body.
    pub async fn notes_raw(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}
