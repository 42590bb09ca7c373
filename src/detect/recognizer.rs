//! Named-entity recognizer seam.

use std::sync::Arc;

use crate::error::Result;
use crate::types::EntitySpan;

/// Labels spans of a text as GPE, PERSON or ORG.
///
/// Recognizers may be expensive to construct, so the detector builds them
/// lazily through a [`RecognizerLoader`].
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Recognize entity spans. Must not fail; unrecognizable text yields
    /// an empty list.
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

/// Factory invoked at most once to construct a recognizer.
///
/// An `Err` marks the recognizer unavailable and detection falls back to
/// substring matching for the detector's lifetime.
pub type RecognizerLoader = Arc<dyn Fn() -> Result<Arc<dyn EntityRecognizer>> + Send + Sync>;
