mod reply;
mod submission;
mod thread;

pub use reply::{ContentFields, Reply, ReplyCategory, field_text};
pub use submission::Submission;
pub use thread::{Thread, ThreadEntry, Threads};
