//! OpenReview API v2 client using reqwest.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::error::{OpenReviewError, Result, error_message};
use super::source::SubmissionSource;
use crate::discussion::{Reply, Submission};
use crate::shared::config::ApiConfig;

/// One page of `GET /notes`.
#[derive(Debug, Deserialize)]
struct NotesPage {
    #[serde(default)]
    notes: Vec<Value>,
    /// Total number of matching notes, when the server reports it.
    count: Option<usize>,
}

/// Production implementation talking to the OpenReview REST API.
pub struct OpenReviewClient {
    http: reqwest::Client,
    base_url: String,
    page_size: usize,
    token: Option<String>,
}

impl OpenReviewClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(OpenReviewError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
            token: config.token.clone(),
        })
    }

    async fn fetch_page(&self, invitation: &str, offset: usize) -> Result<NotesPage> {
        let url = format!("{}/notes", self.base_url);
        let offset = offset.to_string();
        let limit = self.page_size.to_string();
        let mut request = self.http.get(&url).query(&[
            ("invitation", invitation),
            ("details", "replies"),
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| OpenReviewError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| OpenReviewError::Request {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(OpenReviewError::Status {
                url,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| OpenReviewError::Decode { url, source })
    }
}

#[async_trait::async_trait]
impl SubmissionSource for OpenReviewClient {
    async fn fetch_submissions(&self, invitation: &str) -> Result<Vec<Submission>> {
        let mut submissions = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(invitation, offset).await?;
            let fetched = page.notes.len();
            for note in page.notes {
                let submission = split_note(note).map_err(|source| OpenReviewError::Decode {
                    url: format!("{}/notes", self.base_url),
                    source,
                })?;
                submissions.push(submission);
            }
            offset += fetched;
            debug!(invitation, offset, total = ?page.count, "fetched notes page");

            let exhausted = page.count.is_some_and(|total| offset >= total);
            if fetched < self.page_size || exhausted {
                break;
            }
        }

        info!(invitation, count = submissions.len(), "fetched submissions");
        Ok(submissions)
    }
}

/// Split a note with `details.replies` into submission metadata and replies.
fn split_note(mut note: Value) -> std::result::Result<Submission, serde_json::Error> {
    let details = note
        .as_object_mut()
        .and_then(|fields| fields.shift_remove("details"));
    let replies: Vec<Reply> = match details.and_then(|mut d| d.get_mut("replies").map(Value::take)) {
        Some(Value::Null) | None => Vec::new(),
        Some(replies) => serde_json::from_value(replies)?,
    };

    Ok(Submission {
        metadata: note,
        replies,
    })
}
