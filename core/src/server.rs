//! Search server facade.
//!
//! Composes the stop-word set, the mirrored inverted index and the document
//! store behind add/remove/find/match operations. Mutations take `&mut self`
//! and must not overlap reads; read operations are freely concurrent against
//! a stable index, and the parallel query paths only synchronize through the
//! per-query accumulator.

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::relevance::{find_all_documents, rank_documents, ExecutionMode};
use crate::stop_words::StopWordSet;
use crate::store::{average_rating, DocumentData, DocumentStore};
use crate::tokenizer::{is_valid_word, split_into_words};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

pub struct SearchServer {
    stop_words: StopWordSet,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    /// Build a server with stop words from any string container.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            stop_words: StopWordSet::new(stop_words)?,
            index: InvertedIndex::new(),
            documents: DocumentStore::new(),
        })
    }

    /// Build a server with stop words given as one whitespace-joined string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self {
            stop_words: StopWordSet::from_text(text)?,
            index: InvertedIndex::new(),
            documents: DocumentStore::new(),
        })
    }

    /// Index a document. Fails with `InvalidDocumentId` on a negative or
    /// duplicate id and with `InvalidWord` on any control character in the
    /// text; on failure nothing is indexed. A document whose words are all
    /// stop words is valid and ends up with no postings.
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 || self.documents.contains(document_id) {
            return Err(SearchError::InvalidDocumentId(document_id));
        }
        let words = self.split_into_words_no_stop(text)?;
        self.index.add_document(document_id, &words);
        self.documents.insert(
            document_id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        debug!(document_id, word_count = words.len(), "indexed document");
        Ok(())
    }

    /// Remove a document from both index mirrors and the store. Removing an
    /// id that is not live is a silent no-op.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        if self.index.remove_document(document_id) {
            self.documents.remove(document_id);
            debug!(document_id, "removed document");
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.ids()
    }

    /// Word -> term frequency for a document, or an empty mapping when the
    /// id is not live.
    pub fn get_word_frequencies(&self, document_id: DocumentId) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(document_id)
    }

    /// Ranked retrieval over `Actual` documents.
    pub fn find_top_documents(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(mode, raw_query, DocumentStatus::Actual)
    }

    /// Ranked retrieval over documents with the given status.
    pub fn find_top_documents_with_status(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(mode, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Ranked retrieval filtered by an arbitrary predicate over
    /// `(id, status, rating)`. At most [`crate::MAX_RESULT_DOCUMENT_COUNT`]
    /// documents are returned, ordered by relevance descending with a
    /// rating tie-break.
    pub fn find_top_documents_by<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let matched = find_all_documents(mode, &query, &self.index, &self.documents, predicate);
        Ok(rank_documents(matched))
    }

    /// Which plus words of `raw_query` occur in the given document, with the
    /// document's status. Any minus-word hit empties the word list. The
    /// returned words are sorted and deduplicated; both modes agree exactly.
    pub fn match_document(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let Some(data) = self.documents.get(document_id) else {
            return Err(SearchError::UnknownDocumentId(document_id));
        };
        let query = Query::parse(raw_query, &self.stop_words)?;

        let (excluded, matched) = match mode {
            ExecutionMode::Sequential => {
                let excluded = query
                    .minus_words
                    .iter()
                    .any(|&word| self.index.contains(word, document_id));
                let matched = if excluded {
                    Vec::new()
                } else {
                    query
                        .plus_words
                        .iter()
                        .filter(|&&word| self.index.contains(word, document_id))
                        .map(|&word| word.to_string())
                        .collect()
                };
                (excluded, matched)
            }
            ExecutionMode::Parallel => {
                let excluded = query
                    .minus_words
                    .par_iter()
                    .any(|&word| self.index.contains(word, document_id));
                let matched = if excluded {
                    Vec::new()
                } else {
                    query
                        .plus_words
                        .par_iter()
                        .filter(|&&word| self.index.contains(word, document_id))
                        .map(|&word| word.to_string())
                        .collect()
                };
                (excluded, matched)
            }
        };
        debug!(document_id, excluded, matches = matched.len(), "matched document");
        // Query word sets iterate in sorted order, so `matched` is already
        // sorted and deduplicated in both modes.
        Ok((matched, data.status))
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}
