//! LLM crate wrapper implementing [`ResponseProvider`].
//!
//! [`LlmResponseProvider`] stores backend configuration and builds an llm
//! provider per request, sending the prompt as a single user message.

use async_trait::async_trait;
use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use tracing::instrument;

use crate::{ForsetiError, Result};

use super::traits::ResponseProvider;

/// Default completion budget per response.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Wraps llm crate backend configuration to implement [`ResponseProvider`].
///
/// ```ignore
/// use forseti::providers::LlmResponseProvider;
///
/// let provider = LlmResponseProvider::openai("sk-...").model("gpt-4o");
/// ```
pub struct LlmResponseProvider {
    backend: LLMBackend,
    api_key: Option<String>,
    name: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
}

impl LlmResponseProvider {
    /// Create a provider for `backend` answering with `model`.
    ///
    /// `name` is the display name responses are keyed by (e.g. "GPT-4").
    pub fn new(
        backend: LLMBackend,
        api_key: Option<impl Into<String>>,
        name: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            api_key: api_key.map(Into::into),
            name: name.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// OpenAI `gpt-4`, displayed as "GPT-4".
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(LLMBackend::OpenAI, Some(api_key), "GPT-4", "gpt-4")
    }

    /// Anthropic `claude-3-sonnet-20240229`, displayed as "Claude".
    pub fn anthropic(api_key: impl Into<String>) -> Self {
        Self::new(
            LLMBackend::Anthropic,
            Some(api_key),
            "Claude",
            "claude-3-sonnet-20240229",
        )
    }

    /// Google `gemini-pro`, displayed as "Gemini".
    pub fn google(api_key: impl Into<String>) -> Self {
        Self::new(LLMBackend::Google, Some(api_key), "Gemini", "gemini-pro")
    }

    /// DeepSeek `deepseek-chat`, displayed as "DeepSeek".
    pub fn deepseek(api_key: impl Into<String>) -> Self {
        Self::new(
            LLMBackend::DeepSeek,
            Some(api_key),
            "DeepSeek",
            "deepseek-chat",
        )
    }

    /// Override the display name responses are keyed by.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model
    }

    fn build_provider(&self) -> Result<Box<dyn LLMProvider>> {
        let mut builder = LLMBuilder::new()
            .backend(self.backend.clone())
            .model(&self.model)
            .timeout_seconds(self.timeout_secs)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens);
        if let Some(ref key) = self.api_key {
            builder = builder.api_key(key);
        }
        builder.build().map_err(ForsetiError::from)
    }
}

#[async_trait]
impl ResponseProvider for LlmResponseProvider {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, prompt), fields(provider = %self.name, model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let provider = self.build_provider()?;
        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = provider
            .chat(&messages)
            .await
            .map_err(ForsetiError::from)?;

        let text = response.text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ForsetiError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_defaults() {
        let p = LlmResponseProvider::openai("k");
        assert_eq!(ResponseProvider::name(&p), "GPT-4");
        assert_eq!(p.model_id(), "gpt-4");
        assert_eq!(p.max_tokens, DEFAULT_MAX_TOKENS);
        assert!((p.temperature - 0.7).abs() < f32::EPSILON);

        assert_eq!(
            LlmResponseProvider::anthropic("k").model_id(),
            "claude-3-sonnet-20240229"
        );
        assert_eq!(LlmResponseProvider::google("k").model_id(), "gemini-pro");
        assert_eq!(
            LlmResponseProvider::deepseek("k").model_id(),
            "deepseek-chat"
        );
    }

    #[test]
    fn builder_overrides() {
        let p = LlmResponseProvider::deepseek("k")
            .display_name("DS")
            .model("deepseek-reasoner")
            .max_tokens(200)
            .timeout_secs(5);
        assert_eq!(ResponseProvider::name(&p), "DS");
        assert_eq!(p.model_id(), "deepseek-reasoner");
        assert_eq!(p.max_tokens, 200);
        assert_eq!(p.timeout_secs, 5);
    }
}
