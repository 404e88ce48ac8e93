//! In-process ranked document search.
//!
//! Documents are indexed into a mirrored inverted index (word -> postings and
//! document -> word frequencies) and queried with TF-IDF ranking, minus-word
//! exclusion and caller-supplied predicates. Retrieval runs sequentially or
//! fanned out across rayon workers with identical results.

pub mod concurrent_map;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod process_queries;
pub mod request_queue;
pub mod server;
pub mod stop_words;
pub mod store;
pub mod tokenizer;

mod query;
mod relevance;

pub use concurrent_map::{ConcurrentMap, ShardKey};
pub use dedup::remove_duplicates;
pub use document::{Document, DocumentId, DocumentStatus};
pub use error::{Result, SearchError};
pub use paginator::{paginate, Page, Paginator};
pub use process_queries::{process_queries, process_queries_joined};
pub use relevance::{ExecutionMode, MAX_RESULT_DOCUMENT_COUNT};
pub use request_queue::RequestQueue;
pub use server::SearchServer;
pub use stop_words::StopWordSet;
