//! Mock implementations for testing.
//!
//! These mock the two external service seams (embeddings and chat
//! completions) so pipeline tests run with no network dependencies. Both
//! count their calls, which lets tests assert that certain paths make no
//! service call at all.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tome::{CompletionClient, Embedder, RagError, Result};

/// Deterministic embedding client.
///
/// Produces a fixed-dimension vector derived from the text's bytes, so
/// identical texts always embed identically and distinct texts almost
/// always differ. Configure with [`MockEmbedder::failing`] to simulate a
/// service outage.
pub struct MockEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
    should_fail: bool,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// An embedder whose every call fails.
    pub fn failing() -> Self {
        Self {
            dimensions: 0,
            calls: AtomicUsize::new(0),
            should_fail: true,
        }
    }

    /// Number of `embed` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let seed: u32 = text.bytes().fold(7u32, |acc, b| {
            acc.wrapping_mul(31).wrapping_add(b as u32)
        });
        (0..self.dimensions)
            .map(|j| ((seed.wrapping_add(j as u32 * 131)) % 97) as f32 / 97.0)
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(RagError::Embedding("mock embedding failure".to_string()));
        }
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}

/// Chat-completion client returning a canned answer.
pub struct MockCompletion {
    response: String,
    calls: AtomicUsize,
    should_fail: bool,
}

impl MockCompletion {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// A completion client whose every call fails.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            calls: AtomicUsize::new(0),
            should_fail: true,
        }
    }

    /// Number of `generate_with_system` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(RagError::Completion("mock completion failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-completion"
    }
}
