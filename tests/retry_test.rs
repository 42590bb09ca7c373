use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use forseti::providers::{ResponseCollector, ResponseProvider, RetryConfig};
use forseti::{ForsetiError, Result};

/// Mock provider that fails N times then succeeds.
struct FailThenSucceed {
    fail_count: AtomicU32,
    fail_with: fn() -> ForsetiError,
    total_calls: AtomicU32,
}

impl FailThenSucceed {
    fn new(failures: u32, fail_with: fn() -> ForsetiError) -> Self {
        Self {
            fail_count: AtomicU32::new(failures),
            fail_with,
            total_calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.total_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ResponseProvider for FailThenSucceed {
    fn name(&self) -> &str {
        "mock-retry"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let remaining = self.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_count.fetch_sub(1, Ordering::Relaxed);
            return Err((self.fail_with)());
        }
        Ok("ok".into())
    }
}

fn fast_config(max_attempts: u32) -> RetryConfig {
    RetryConfig::new()
        .max_attempts(max_attempts)
        .initial_delay(Duration::from_millis(1))
        .max_delay(Duration::from_millis(5))
}

fn retrying_collector(inner: &Arc<FailThenSucceed>, config: RetryConfig) -> ResponseCollector {
    ResponseCollector::new()
        .with_retry_config(config)
        .with_provider(inner.clone())
}

#[tokio::test]
async fn retries_on_transient_error_then_succeeds() {
    let inner = Arc::new(FailThenSucceed::new(2, || ForsetiError::RateLimited {
        retry_after: None,
    }));
    let collector = retrying_collector(&inner, fast_config(3));

    assert_eq!(collector.generate("mock-retry", "hi").await.unwrap(), "ok");
    assert_eq!(inner.call_count(), 3);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let inner = Arc::new(FailThenSucceed::new(10, || ForsetiError::Api {
        status: 503,
        message: "overloaded".into(),
    }));
    let collector = retrying_collector(&inner, fast_config(4));

    let err = collector.generate("mock-retry", "hi").await.unwrap_err();
    assert!(matches!(err, ForsetiError::Api { status: 503, .. }));
    assert_eq!(inner.call_count(), 4);
}

#[tokio::test]
async fn permanent_error_is_not_retried() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForsetiError::AuthenticationFailed));
    let collector = retrying_collector(&inner, fast_config(5));

    let err = collector.generate("mock-retry", "hi").await.unwrap_err();
    assert!(matches!(err, ForsetiError::AuthenticationFailed));
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn client_error_status_is_not_retried() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForsetiError::Api {
        status: 400,
        message: "bad request".into(),
    }));
    let collector = retrying_collector(&inner, fast_config(5));

    assert!(collector.generate("mock-retry", "hi").await.is_err());
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn disabled_config_makes_one_attempt() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForsetiError::Http("reset".into())));
    let collector = retrying_collector(&inner, RetryConfig::disabled());

    assert!(collector.generate("mock-retry", "hi").await.is_err());
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn zero_attempts_still_calls_once() {
    let inner = Arc::new(FailThenSucceed::new(0, || ForsetiError::EmptyResponse));
    let collector = retrying_collector(&inner, fast_config(0));

    assert_eq!(collector.generate("mock-retry", "hi").await.unwrap(), "ok");
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn retry_after_hint_is_honoured() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForsetiError::RateLimited {
        retry_after: Some(Duration::from_secs(30)),
    }));
    let collector = retrying_collector(&inner, fast_config(2));

    let start = tokio::time::Instant::now();
    assert_eq!(collector.generate("mock-retry", "hi").await.unwrap(), "ok");
    assert!(start.elapsed() >= Duration::from_secs(30));
}

#[tokio::test]
async fn retries_are_not_compounded_across_prompts() {
    let inner = Arc::new(FailThenSucceed::new(2, || ForsetiError::Http("reset".into())));
    let collector = retrying_collector(&inner, fast_config(3));

    let responses = collector.collect("hi").await;
    assert_eq!(responses["mock-retry"], "ok");
    assert_eq!(inner.call_count(), 3);

    collector.collect("again").await;
    assert_eq!(inner.call_count(), 4);
}
