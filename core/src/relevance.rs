//! TF-IDF relevance aggregation and ranking.
//!
//! Plus-word contributions accumulate per document under the caller's
//! predicate, minus words then exclude documents outright, and survivors are
//! ranked by relevance with a rating tie-break. The parallel path fans out
//! over plus words and their postings into a [`ConcurrentMap`] and must
//! produce the same ranked output as the sequential path.

use crate::concurrent_map::ConcurrentMap;
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::store::DocumentStore;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Ranked retrieval returns at most this many documents.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Two relevances closer than this are tied and ordered by rating instead.
pub(crate) const RELEVANCE_EPSILON: f64 = 1e-6;

/// Shard count for the per-query relevance accumulator.
const RELEVANCE_SHARD_COUNT: usize = 100;

/// How a retrieval request is evaluated. Both modes produce the same ranked
/// result; `Parallel` fans the plus-word accumulation out across rayon
/// workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

/// `ln(N / posting count)` for a word. Callers must skip words with no
/// postings; empty buckets never survive removal, so a present bucket is
/// non-empty.
fn inverse_document_freq(document_count: usize, posting_count: usize) -> f64 {
    (document_count as f64 / posting_count as f64).ln()
}

pub(crate) fn find_all_documents<P>(
    mode: ExecutionMode,
    query: &Query<'_>,
    index: &InvertedIndex,
    store: &DocumentStore,
    predicate: P,
) -> Vec<Document>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let relevance = match mode {
        ExecutionMode::Sequential => accumulate_sequential(query, index, store, &predicate),
        ExecutionMode::Parallel => accumulate_parallel(query, index, store, &predicate),
    };
    relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            store
                .get(id)
                .map(|data| Document::new(id, relevance, data.rating))
        })
        .collect()
}

fn accumulate_sequential<P>(
    query: &Query<'_>,
    index: &InvertedIndex,
    store: &DocumentStore,
    predicate: &P,
) -> BTreeMap<DocumentId, f64>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
    for &word in &query.plus_words {
        let Some(postings) = index.postings(word) else {
            continue;
        };
        let idf = inverse_document_freq(store.len(), postings.len());
        for (&id, &tf) in postings {
            let Some(data) = store.get(id) else { continue };
            if predicate(id, data.status, data.rating) {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
    }
    for &word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
    }
    relevance
}

fn accumulate_parallel<P>(
    query: &Query<'_>,
    index: &InvertedIndex,
    store: &DocumentStore,
    predicate: &P,
) -> BTreeMap<DocumentId, f64>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let accumulator: ConcurrentMap<DocumentId, f64> = ConcurrentMap::new(RELEVANCE_SHARD_COUNT);
    query.plus_words.par_iter().for_each(|&word| {
        let Some(postings) = index.postings(word) else {
            return;
        };
        let idf = inverse_document_freq(store.len(), postings.len());
        postings.par_iter().for_each(|(&id, &tf)| {
            let Some(data) = store.get(id) else { return };
            if predicate(id, data.status, data.rating) {
                accumulator.update(id, |slot| *slot += tf * idf);
            }
        });
    });
    // The fan-out above has fully completed here; exclusion never races with
    // accumulation.
    for &word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for &id in postings.keys() {
                accumulator.erase(&id);
            }
        }
    }
    accumulator.into_ordinary_map()
}

/// Sort by relevance descending, breaking near-ties (within
/// [`RELEVANCE_EPSILON`]) by rating descending, and truncate to the top
/// [`MAX_RESULT_DOCUMENT_COUNT`].
pub(crate) fn rank_documents(mut matched: Vec<Document>) -> Vec<Document> {
    matched.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance
                .partial_cmp(&lhs.relevance)
                .unwrap_or(Ordering::Equal)
        }
    });
    matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
    matched
}
