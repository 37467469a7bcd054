//! Environment-driven configuration.
//!
//! Every knob has a default matching the shipped product; only the OpenAI
//! API key is mandatory.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::types::{RagError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub limits: LimitsConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base: String,
    pub embedding_model: String,
    pub chat_model: String,
    /// Maximum number of texts per embedding request.
    pub embed_batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// Soft upper bound on chunk length, in characters. A single
    /// paragraph longer than this still becomes one (oversized) chunk.
    pub max_chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest chunks to retrieve per query.
    pub top_k: usize,
    /// Per-chunk character budget when formatting retrieved context.
    pub snippet_budget: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted size of a single uploaded file, in bytes.
    pub max_file_bytes: u64,
}

/// Retry policy for calls to the embedding and completion services.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per call, including the first one.
    pub max_attempts: u32,
    /// Backoff before the first retry; doubles on each subsequent retry.
    #[serde(with = "duration_millis")]
    pub initial_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            openai: OpenAiConfig {
                api_key: env::var("OPENAI_API_KEY").map_err(|_| {
                    RagError::Configuration("OPENAI_API_KEY is not set".to_string())
                })?,
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                embed_batch_size: parse_env("EMBED_BATCH_SIZE", 16)?,
            },
            chunking: ChunkingConfig {
                max_chunk_size: parse_env("CHUNK_SIZE", 1000)?,
            },
            retrieval: RetrievalConfig {
                top_k: parse_env("TOP_K", 5)?,
                snippet_budget: parse_env("SNIPPET_BUDGET", 800)?,
            },
            limits: LimitsConfig {
                max_file_bytes: parse_env("MAX_FILE_BYTES", 50 * 1024 * 1024)?,
            },
            retry: RetryConfig {
                max_attempts: parse_env("SERVICE_MAX_ATTEMPTS", 3)?,
                initial_backoff: Duration::from_millis(parse_env(
                    "SERVICE_BACKOFF_MS",
                    200u64,
                )?),
            },
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| RagError::Configuration(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_defaults() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.initial_backoff, Duration::from_millis(200));
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        // Key that no environment sets
        let value: usize = parse_env("TOME_TEST_UNSET_KEY", 42).unwrap();
        assert_eq!(value, 42);
    }
}
