//! Mirrored inverted index.
//!
//! Two structures are kept consistent on every insert and removal: word ->
//! (document id -> term frequency) for posting lookups, and document id ->
//! (word -> term frequency) for O(document size) removal and the
//! word-frequency query consumed by the duplicate detector.

use crate::document::DocumentId;
use std::collections::{BTreeMap, HashMap};

static EMPTY_ROW: BTreeMap<String, f64> = BTreeMap::new();

type Postings = BTreeMap<DocumentId, f64>;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_docs: HashMap<String, Postings>,
    doc_to_words: HashMap<DocumentId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `words` for `id`, incrementing each term frequency by
    /// `1 / words.len()`. A document with no indexable words still gets a
    /// (empty) row so it participates in removal and frequency lookups.
    pub(crate) fn add_document(&mut self, id: DocumentId, words: &[&str]) {
        let row = self.doc_to_words.entry(id).or_default();
        if words.is_empty() {
            return;
        }
        let tf_step = 1.0 / words.len() as f64;
        for &word in words {
            *self
                .word_to_docs
                .entry(word.to_string())
                .or_default()
                .entry(id)
                .or_insert(0.0) += tf_step;
            *row.entry(word.to_string()).or_insert(0.0) += tf_step;
        }
    }

    /// Delete every (word, id) pair from both mirrors. Returns whether the
    /// document was present; absent ids are a no-op.
    pub(crate) fn remove_document(&mut self, id: DocumentId) -> bool {
        let Some(row) = self.doc_to_words.remove(&id) else {
            return false;
        };
        for word in row.keys() {
            if let Some(postings) = self.word_to_docs.get_mut(word) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.word_to_docs.remove(word);
                }
            }
        }
        true
    }

    /// Postings for `word`, ordered by document id. `None` when no live
    /// document contains the word (empty buckets are dropped on removal).
    pub(crate) fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_docs.get(word)
    }

    pub(crate) fn contains(&self, word: &str, id: DocumentId) -> bool {
        self.word_to_docs
            .get(word)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// The word -> term frequency row for `id`, or an empty mapping for ids
    /// that were never indexed or have been removed.
    pub fn word_frequencies(&self, id: DocumentId) -> &BTreeMap<String, f64> {
        self.doc_to_words.get(&id).unwrap_or(&EMPTY_ROW)
    }
}
