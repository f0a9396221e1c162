//! On-disk corpus: raw fetch cache, per-submission records and the aggregate.

mod aggregate;
mod corpus;
mod error;
mod json_file;
mod paths;

pub use aggregate::Aggregate;
pub use corpus::CorpusStorage;
pub use error::StorageError;
