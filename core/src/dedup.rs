use crate::document::DocumentId;
use crate::server::SearchServer;
use std::collections::{BTreeSet, HashSet};
use tracing::info;

/// Remove documents whose vocabulary (word set, frequencies ignored) equals
/// that of an earlier document. Ids are scanned in ascending order, so the
/// lowest id of each group survives. Returns the removed ids.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut seen: HashSet<BTreeSet<String>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in server.document_ids().collect::<Vec<_>>() {
        let vocabulary: BTreeSet<String> = server
            .get_word_frequencies(id)
            .keys()
            .cloned()
            .collect();
        if !seen.insert(vocabulary) {
            duplicates.push(id);
        }
    }
    for &id in &duplicates {
        info!(document_id = id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}
