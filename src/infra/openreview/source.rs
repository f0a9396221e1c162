use crate::discussion::Submission;

use super::error::Result;

/// Source of submissions with their full reply lists.
///
/// The scrape pipeline only depends on this trait, so it can run against
/// in-memory fixtures as well as the live API.
#[async_trait::async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Fetch every submission posted under `invitation`, replies included.
    async fn fetch_submissions(&self, invitation: &str) -> Result<Vec<Submission>>;
}

/// In-memory source returning a fixed set of submissions.
#[cfg(test)]
pub struct StaticSource {
    pub submissions: Vec<Submission>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StaticSource {
    pub fn new(submissions: Vec<Submission>) -> Self {
        Self {
            submissions,
            calls: Default::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl SubmissionSource for StaticSource {
    async fn fetch_submissions(&self, _invitation: &str) -> Result<Vec<Submission>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.submissions.clone())
    }
}
