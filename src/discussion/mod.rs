//! Discussion thread reconstruction.
//!
//! Turns the flat reply list of a submission into threads rooted at its
//! top-level replies and renders them in structured and flat text form.

mod error;
pub mod models;
mod reconstruct;
mod render;
mod serialize;
#[cfg(test)]
pub mod testing;

pub use error::DiscussionError;
pub use models::{Reply, Submission};
pub use serialize::{SubmissionRecord, process_submission};
