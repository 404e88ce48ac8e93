use crate::document::DocumentId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Validation failures surfaced by indexing, query parsing and matching.
///
/// All of these are deterministic input errors; none are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Document id is negative or already present in the store.
    #[error("invalid document id {0}")]
    InvalidDocumentId(DocumentId),

    /// A document or stop word contains a control character.
    #[error("word {0:?} is invalid")]
    InvalidWord(String),

    /// A query token is blank or a lone minus sign.
    #[error("query word is empty")]
    EmptyQueryWord,

    /// A query token has a double minus prefix or an invalid word body.
    #[error("query word {0:?} is invalid")]
    InvalidQueryWord(String),

    /// Match or lookup against an id that is not live.
    #[error("unknown document id {0}")]
    UnknownDocumentId(DocumentId),
}
