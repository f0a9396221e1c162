//! OpenReview API access.
//!
//! The pipeline consumes the narrow [`SubmissionSource`] trait;
//! [`OpenReviewClient`] is the reqwest-backed implementation.

mod client;
mod error;
#[cfg(test)]
pub mod mock;
mod source;

pub use client::OpenReviewClient;
#[cfg(test)]
pub use source::StaticSource;
pub use source::SubmissionSource;
