//! Response provider trait.
//!
//! A provider turns a prompt into response text. Implementations are
//! independent (one per vendor) and composed by name in a
//! [`ResponseCollector`](super::ResponseCollector), which owns retries.
//! Implementations make a single attempt per call.

use async_trait::async_trait;

use crate::Result;

/// Source of model-generated text for a prompt.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Generate a response to a single user prompt.
    ///
    /// Transport, authentication and API failures are errors; classify
    /// them with [`ForsetiError::is_transient`](crate::ForsetiError::is_transient).
    async fn generate(&self, prompt: &str) -> Result<String>;
}
