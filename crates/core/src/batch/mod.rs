//! Chunked batch execution
//!
//! Voucher operations fan out over several ids. Ids are processed in
//! consecutive chunks: every operation within a chunk runs concurrently,
//! chunks run one after another, and results come back in input order.

use std::future::Future;

use futures::future::try_join_all;
use perx_domain::{PerxError, Result};
use tracing::debug;

/// Apply `operation` to every item in chunks of `chunk_size`.
///
/// `context` (usually the access token) is shared by every call. The first
/// failure aborts the batch; later chunks are never started.
///
/// # Errors
/// `BadInput` for a zero `chunk_size`, otherwise the first operation error.
pub async fn for_each_chunked<'a, C, I, R, F, Fut>(
    context: &'a C,
    items: &'a [I],
    chunk_size: usize,
    operation: F,
) -> Result<Vec<R>>
where
    C: ?Sized + Sync,
    I: Sync,
    F: Fn(&'a C, &'a I) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    if chunk_size == 0 {
        return Err(PerxError::bad_input("chunk size must be at least 1"));
    }

    let mut results = Vec::with_capacity(items.len());
    for (index, chunk) in items.chunks(chunk_size).enumerate() {
        debug!(chunk = index, size = chunk.len(), "dispatching chunk");
        let outcomes = try_join_all(chunk.iter().map(|item| operation(context, item))).await?;
        results.extend(outcomes);
    }
    Ok(results)
}
