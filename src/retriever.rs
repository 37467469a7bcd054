//! Query-time retrieval: embed the query, search the index, and map hit
//! positions back to chunk texts.

use tome_vector::FlatIndex;
use tracing::{debug, warn};

use crate::embeddings::Embedder;
use crate::types::Result;

/// Retrieve up to `k` chunks relevant to `query`, nearest first.
///
/// Positions outside the chunk sequence are discarded; they cannot occur
/// while the index and chunks are kept in lockstep, but the bounds check
/// is an explicit invariant of this layer. An empty result is a valid
/// "no relevant content" outcome, not a failure.
pub async fn retrieve(
    embedder: &dyn Embedder,
    index: &FlatIndex,
    chunks: &[String],
    query: &str,
    k: usize,
) -> Result<Vec<String>> {
    let query_vector = embedder.embed_query(query).await?;
    let neighbors = index.search(&query_vector, k)?;

    let mut matched = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        match chunks.get(neighbor.position) {
            Some(chunk) => matched.push(chunk.clone()),
            None => {
                warn!(
                    position = neighbor.position,
                    chunks = chunks.len(),
                    "Discarding out-of-range index position"
                );
            }
        }
    }

    debug!(query_len = query.len(), hits = matched.len(), "Retrieved chunks");
    Ok(matched)
}

/// Format retrieved chunks into a numbered context block, truncating each
/// chunk to `budget` characters.
pub fn format_context(chunks: &[String], budget: usize) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("[Source {}]\n{}", i + 1, shorten(chunk, budget)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Truncate `text` to at most `budget` characters, appending an ellipsis
/// when content was dropped. Always cuts on a character boundary.
fn shorten(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let cut: String = text.chars().take(budget.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
