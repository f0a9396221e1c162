//! OpenReview API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenReviewError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenReview API error (HTTP {status}) for {url}{}", format_message(.message))]
    Status {
        url: String,
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, OpenReviewError>;

fn format_message(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

/// Extract the `message` of an OpenReview error body, e.g.
/// `{"name": "ForbiddenError", "message": "...", "status": 403}`.
pub(super) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::json_message(r#"{"name": "NotFoundError", "message": "No note"}"#, Some("No note"))]
    #[case::plain_text("Bad Gateway", Some("Bad Gateway"))]
    #[case::json_without_message(r#"{"status": 500}"#, Some(r#"{"status": 500}"#))]
    #[case::empty("  ", None)]
    fn test_error_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(error_message(body).as_deref(), expected);
    }

    #[test]
    fn test_status_display() {
        let err = OpenReviewError::Status {
            url: "https://api2.openreview.net/notes".to_string(),
            status: 403,
            message: Some("Forbidden".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "OpenReview API error (HTTP 403) for https://api2.openreview.net/notes: Forbidden"
        );
    }

    #[test]
    fn test_status_display_without_message() {
        let err = OpenReviewError::Status {
            url: "u".to_string(),
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "OpenReview API error (HTTP 502) for u");
    }
}
