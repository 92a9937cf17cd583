//! Draft provider trait — common interface for chat-model backends.

use async_trait::async_trait;

pub use crate::llm::openai::Message;

// ── Common Parameters ──────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct LlmParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

/// Failure signal from a draft request. The pipeline never interprets these
/// beyond "no content this attempt"; they propagate to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model response carried no content")]
    EmptyResponse,
}

/// Common interface for draft backends (OpenAI-compatible endpoints).
#[async_trait]
pub trait DraftProvider: Send + Sync {
    /// Request one complete draft for the given conversation.
    async fn draft(
        &self,
        messages: Vec<Message>,
        options: Option<LlmParams>,
    ) -> Result<String, DraftError>;

    /// Provider identifier (e.g. "openai").
    fn id(&self) -> &str;
}

// ── OpenAI adapter ─────────────────────────────────────

use crate::llm::openai::OpenAIClient;

/// Wraps [`OpenAIClient`] to implement `DraftProvider`.
pub struct OpenAIProvider {
    client: OpenAIClient,
    provider_id: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key, base_url, model),
            provider_id: "openai".to_string(),
        }
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.provider_id = id;
        self
    }
}

#[async_trait]
impl DraftProvider for OpenAIProvider {
    async fn draft(
        &self,
        messages: Vec<Message>,
        options: Option<LlmParams>,
    ) -> Result<String, DraftError> {
        self.client.chat(messages, options).await
    }

    fn id(&self) -> &str {
        &self.provider_id
    }
}
