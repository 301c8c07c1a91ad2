pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::InferenceModel;
pub use storage::DigestStorage;
pub use types::{
    ArticleRecord, Digest, JournalEntry, Provenance, RetrievalResult, SummaryRecord,
    ABSTRACT_PLACEHOLDER, SUMMARY_PLACEHOLDER,
};
