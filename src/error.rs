//! Forseti error types

use std::time::Duration;

/// Forseti error types.
///
/// The analysis pipeline itself never fails once constructed; these errors
/// come from configuration, persistence and response providers.
#[derive(Debug, thiserror::Error)]
pub enum ForsetiError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("empty response from model")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no provider configured")]
    NoProvider,

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// The structured entity recognizer could not be loaded. Detection
    /// keeps working in substring-only mode.
    #[error("entity recognizer unavailable: {0}")]
    RecognizerUnavailable(String),

    // Wrapped llm crate error
    #[error("LLM error: {0}")]
    Llm(String),
}

impl ForsetiError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ForsetiError::RateLimited { .. }
            | ForsetiError::Http(_)
            | ForsetiError::EmptyResponse => true,
            ForsetiError::Api { status, .. } => {
                matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Provider-supplied retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ForsetiError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<llm::error::LLMError> for ForsetiError {
    fn from(err: llm::error::LLMError) -> Self {
        use llm::error::LLMError;

        match err {
            // Transport failures (timeouts, resets, DNS) are worth retrying
            // unless the message carries a more specific status.
            LLMError::HttpError(msg) => {
                classify_message(&msg).unwrap_or(ForsetiError::Http(msg))
            }
            LLMError::AuthError(_) => ForsetiError::AuthenticationFailed,
            LLMError::InvalidRequest(msg) => ForsetiError::InvalidInput(msg),
            LLMError::ProviderError(msg) => {
                classify_message(&msg).unwrap_or(ForsetiError::Llm(msg))
            }
            LLMError::ResponseFormatError { message, .. } => {
                classify_message(&message).unwrap_or(ForsetiError::Llm(message))
            }
            other => {
                let msg = other.to_string();
                classify_message(&msg).unwrap_or(ForsetiError::Llm(msg))
            }
        }
    }
}

/// Map a provider message to a typed error by the status it mentions.
fn classify_message(msg: &str) -> Option<ForsetiError> {
    let lower = msg.to_lowercase();
    let status = http_status(msg);
    if lower.contains("rate limit") || status == Some(429) {
        Some(ForsetiError::RateLimited { retry_after: None })
    } else if lower.contains("authentication")
        || lower.contains("invalid api key")
        || status == Some(401)
    {
        Some(ForsetiError::AuthenticationFailed)
    } else if status == Some(404) || lower.contains("model not found") {
        Some(ForsetiError::ModelNotFound(msg.to_string()))
    } else {
        status.map(|status| ForsetiError::Api {
            status,
            message: msg.to_string(),
        })
    }
}

/// First standalone three-digit token in the 4xx/5xx range.
fn http_status(msg: &str) -> Option<u16> {
    msg.split(|c: char| !c.is_ascii_digit())
        .filter(|token| token.len() == 3)
        .filter_map(|token| token.parse::<u16>().ok())
        .find(|code| (400..600).contains(code))
}

impl From<toml::de::Error> for ForsetiError {
    fn from(err: toml::de::Error) -> Self {
        ForsetiError::Configuration(err.to_string())
    }
}

/// Result type alias for Forseti operations
pub type Result<T> = std::result::Result<T, ForsetiError>;
