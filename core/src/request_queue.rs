use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::relevance::ExecutionMode;
use crate::server::SearchServer;
use std::collections::VecDeque;

/// Trailing request window, sized as minutes in a day.
const REQUEST_WINDOW: usize = 1440;

/// Wraps retrieval calls and tracks how many requests inside the trailing
/// window produced no results. Requests that fail to parse are surfaced to
/// the caller and not recorded.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            requests: VecDeque::with_capacity(REQUEST_WINDOW),
            no_result_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self
            .server
            .find_top_documents(ExecutionMode::Sequential, raw_query)?;
        self.record(&result);
        Ok(result)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents_with_status(
            ExecutionMode::Sequential,
            raw_query,
            status,
        )?;
        self.record(&result);
        Ok(result)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let result =
            self.server
                .find_top_documents_by(ExecutionMode::Sequential, raw_query, predicate)?;
        self.record(&result);
        Ok(result)
    }

    /// Number of empty-result requests inside the trailing window.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, result: &[Document]) {
        let is_empty = result.is_empty();
        if is_empty {
            self.no_result_count += 1;
        }
        self.requests.push_back(is_empty);
        if self.requests.len() > REQUEST_WINDOW {
            if self.requests.pop_front() == Some(true) {
                self.no_result_count -= 1;
            }
        }
    }
}
