//! Embedding client abstraction and the OpenAI-backed implementation.
//!
//! The embedder turns an ordered sequence of texts into one fixed-length
//! `f32` vector per text, in the same order. The OpenAI implementation
//! batches requests to bound their size; batching is invisible in the
//! output ordering. A failed batch fails the whole call — a partial
//! vector set is unsafe to index.

use async_openai::{
    config::OpenAIConfig,
    types::embeddings::{CreateEmbeddingRequestArgs, EmbeddingInput},
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use crate::config::{OpenAiConfig, RetryConfig};
use crate::retry::with_retry;
use crate::types::{RagError, Result};

/// Text-to-vector service abstraction.
///
/// Implementations must preserve input order in the output and return
/// exactly one vector per input text.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed all `texts`, one vector per text, in order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query string.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Embedding("service returned no vectors".to_string()))
    }

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// OpenAI embeddings API client.
pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    batch_size: usize,
    retry: RetryConfig,
}

impl OpenAiEmbedder {
    pub fn new(config: &OpenAiConfig, retry: RetryConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.api_base.clone());

        Self {
            client: Client::with_config(openai_config),
            model: config.embedding_model.clone(),
            batch_size: config.embed_batch_size.max(1),
            retry,
        }
    }

    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(EmbeddingInput::StringArray(batch.to_vec()))
            .build()
            .map_err(|e| RagError::Embedding(format!("Failed to build request: {}", e)))?;

        let response = with_retry(&self.retry, "embeddings", || {
            let request = request.clone();
            async move { self.client.embeddings().create(request).await }
        })
        .await
        .map_err(|e| RagError::Embedding(format!("OpenAI API error: {}", e)))?;

        if response.data.len() != batch.len() {
            return Err(RagError::Embedding(format!(
                "service returned {} vectors for {} inputs",
                response.data.len(),
                batch.len()
            )));
        }

        // The API is not required to return entries in request order
        let mut data = response.data;
        data.sort_by_key(|e| e.index);

        Ok(data.into_iter().map(|e| e.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let batch_vectors = self.embed_batch(batch).await?;
            vectors.extend(batch_vectors);
        }

        debug!(
            texts = texts.len(),
            batch_size = self.batch_size,
            "Embedded texts"
        );
        Ok(vectors)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
