//! Completion client abstraction and the OpenAI-backed implementation.
//!
//! The pipeline needs exactly one generation shape: a system instruction
//! plus one user message carrying retrieved context and the question.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::config::{OpenAiConfig, RetryConfig};
use crate::retry::with_retry;
use crate::types::{RagError, Result};

/// Generic completion client trait for provider abstraction.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion from a system instruction and a user prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// OpenAI chat completions API client.
pub struct OpenAiCompletion {
    client: Client<OpenAIConfig>,
    model: String,
    retry: RetryConfig,
}

impl OpenAiCompletion {
    pub fn new(config: &OpenAiConfig, retry: RetryConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.api_base.clone());

        Self {
            client: Client::with_config(openai_config),
            model: config.chat_model.clone(),
            retry,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletion {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                    system.to_string(),
                )),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                    prompt.to_string(),
                )),
            ])
            .temperature(0.2)
            .build()
            .map_err(|e| RagError::Completion(format!("Failed to build request: {}", e)))?;

        let response = with_retry(&self.retry, "chat completion", || {
            let request = request.clone();
            async move { self.client.chat().create(request).await }
        })
        .await
        .map_err(|e| RagError::Completion(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .ok_or_else(|| RagError::Completion("No response from OpenAI".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
