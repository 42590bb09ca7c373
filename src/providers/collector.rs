//! Response collection across registered providers.
//!
//! [`ResponseCollector`] holds providers in registration order, keyed by
//! their display names, and queries them sequentially. A provider that
//! still fails after retries contributes an empty string, which every
//! downstream analysis treats as "no entity mentioned".

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::telemetry;
use crate::types::{ModelResponses, Question};
use crate::{ForsetiError, Result};

use super::retry::{RetryConfig, with_retry};
use super::traits::ResponseProvider;

/// Sequential, name-keyed registry of response providers.
pub struct ResponseCollector {
    providers: Vec<Arc<dyn ResponseProvider>>,
    retry: RetryConfig,
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            retry: RetryConfig::default(),
        }
    }

    /// Set retry behaviour for every provider call.
    pub fn set_retry_config(&mut self, config: RetryConfig) {
        self.retry = config;
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Register a provider. A provider with the same name is replaced in
    /// place, keeping its position.
    pub fn add(&mut self, provider: Arc<dyn ResponseProvider>) {
        match self
            .providers
            .iter_mut()
            .find(|p| p.name() == provider.name())
        {
            Some(existing) => *existing = provider,
            None => self.providers.push(provider),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn ResponseProvider>) -> Self {
        self.add(provider);
        self
    }

    /// Provider names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Query one provider by name, with retries.
    pub async fn generate(&self, name: &str, prompt: &str) -> Result<String> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ForsetiError::UnknownProvider(name.to_string()))?;
        self.call(provider.as_ref(), prompt).await
    }

    /// Ask every provider `prompt`: `provider_name -> response text`.
    ///
    /// Never fails; failed providers map to an empty string.
    #[instrument(skip(self, prompt), fields(providers = self.providers.len()))]
    pub async fn collect(&self, prompt: &str) -> BTreeMap<String, String> {
        let mut responses = BTreeMap::new();
        for provider in &self.providers {
            let text = self.call_or_empty(provider.as_ref(), prompt).await;
            responses.insert(provider.name().to_string(), text);
        }
        responses
    }

    /// Ask every provider every question:
    /// `provider_name -> question_id -> response text`.
    #[instrument(skip_all, fields(providers = self.providers.len()))]
    pub async fn collect_battery<'a, I>(&self, questions: I) -> ModelResponses
    where
        I: IntoIterator<Item = &'a Question>,
    {
        let questions: Vec<&Question> = questions.into_iter().collect();
        let mut responses = ModelResponses::new();

        for provider in &self.providers {
            let mut answers = BTreeMap::new();
            for question in &questions {
                let text = self.call_or_empty(provider.as_ref(), &question.prompt).await;
                answers.insert(question.id.clone(), text);
            }
            let answered = answers.values().filter(|t| !t.is_empty()).count();
            info!(
                provider = provider.name(),
                answered,
                asked = questions.len(),
                "battery collected"
            );
            responses.insert(provider.name().to_string(), answers);
        }

        responses
    }

    async fn call_or_empty(&self, provider: &dyn ResponseProvider, prompt: &str) -> String {
        match self.call(provider, prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "provider failed, recording empty response"
                );
                String::new()
            }
        }
    }

    async fn call(&self, provider: &dyn ResponseProvider, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let result = with_retry(&self.retry, provider.name(), "generate", || {
            provider.generate(prompt)
        })
        .await;
        Self::record_request(provider.name(), start, result.is_ok());
        result
    }

    fn record_request(provider: &str, start: Instant, success: bool) {
        let status = if success { "ok" } else { "error" };
        metrics::counter!(telemetry::PROVIDER_REQUESTS_TOTAL,
            "provider" => provider.to_owned(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::PROVIDER_REQUEST_DURATION_SECONDS,
            "provider" => provider.to_owned(),
        )
        .record(start.elapsed().as_secs_f64());
    }
}

impl Default for ResponseCollector {
    fn default() -> Self {
        Self::new()
    }
}
