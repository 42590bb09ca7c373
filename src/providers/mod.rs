//! Response providers and collection.
//!
//! - [`ResponseProvider`]: prompt in, text out
//! - [`LlmResponseProvider`]: llm crate backends (OpenAI, Anthropic, Google, DeepSeek)
//! - [`RetryConfig`]: backoff settings for transient errors
//! - [`ResponseCollector`]: queries every registered provider by name, with retries

mod collector;
mod llm_response;
mod retry;
mod traits;

pub use collector::ResponseCollector;
pub use llm_response::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, LlmResponseProvider,
};
pub use retry::RetryConfig;
pub use traits::ResponseProvider;
