use crate::document::Document;
use crate::error::Result;
use crate::relevance::ExecutionMode;
use crate::server::SearchServer;
use rayon::prelude::*;

/// Evaluate a batch of queries, one result list per query, in input order.
/// `Parallel` fans out across queries while each query itself runs
/// sequentially. The first parse failure aborts the batch.
pub fn process_queries<S>(
    mode: ExecutionMode,
    server: &SearchServer,
    queries: &[S],
) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    match mode {
        ExecutionMode::Sequential => queries
            .iter()
            .map(|query| server.find_top_documents(ExecutionMode::Sequential, query.as_ref()))
            .collect(),
        ExecutionMode::Parallel => queries
            .par_iter()
            .map(|query| server.find_top_documents(ExecutionMode::Sequential, query.as_ref()))
            .collect(),
    }
}

/// Like [`process_queries`], with the per-query results concatenated in
/// query order.
pub fn process_queries_joined<S>(
    mode: ExecutionMode,
    server: &SearchServer,
    queries: &[S],
) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(mode, server, queries)?
        .into_iter()
        .flatten()
        .collect())
}
