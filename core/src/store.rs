use crate::document::{DocumentId, DocumentStatus};
use std::collections::BTreeMap;

/// Per-document attributes recorded at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Maps live document ids to their status and average rating. Keys are kept
/// ordered; ascending-id iteration is load-bearing for the duplicate
/// detector, which removes the later of two equal documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: DocumentId, data: DocumentData) {
        self.documents.insert(id, data);
    }

    pub(crate) fn remove(&mut self, id: DocumentId) -> Option<DocumentData> {
        self.documents.remove(&id)
    }

    pub(crate) fn get(&self, id: DocumentId) -> Option<DocumentData> {
        self.documents.get(&id).copied()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Live ids in ascending numeric order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }
}

/// Truncating integer mean of the ratings, 0 when none were given.
/// Truncation is toward zero, also for negative sums.
pub(crate) fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
