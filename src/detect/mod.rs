//! Entity detection.
//!
//! [`EntityDetector`] decides whether a text mentions a catalog entity.
//! When a recognizer is configured it is consulted first: a GPE, PERSON
//! or ORG span whose text contains one of the entity's aliases counts as a
//! mention. Otherwise, or when the recognizer finds nothing, a
//! case-insensitive alias substring match decides.
//!
//! Recognizers load lazily with double-checked locking, at most once per
//! detector. A failed load is logged and detection continues on the
//! substring path.

mod heuristic;
mod recognizer;

pub use heuristic::HeuristicRecognizer;
pub use recognizer::{EntityRecognizer, RecognizerLoader};

use std::iter;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::telemetry;
use crate::types::{DetectionMethod, DetectionResult, EntityCatalog, EntityLabel, EntitySpan};

/// Load state of the detector's recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerStatus {
    /// No recognizer configured; substring matching only.
    Disabled,
    /// Configured but not loaded yet.
    Cold,
    Ready,
    /// Loading failed; substring matching only.
    Unavailable,
}

enum RecognizerState {
    Cold,
    Ready(Arc<dyn EntityRecognizer>),
    Unavailable,
}

/// Detects catalog entities in free text.
pub struct EntityDetector {
    catalog: Arc<EntityCatalog>,
    loader: Option<RecognizerLoader>,
    state: RwLock<RecognizerState>,
}

impl std::fmt::Debug for EntityDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDetector")
            .field("entities", &self.catalog.len())
            .field("recognizer", &self.status())
            .finish()
    }
}

impl EntityDetector {
    /// Substring-only detector. Construction does no loading.
    pub fn new(catalog: Arc<EntityCatalog>) -> Self {
        Self {
            catalog,
            loader: None,
            state: RwLock::new(RecognizerState::Cold),
        }
    }

    /// Detector that consults a recognizer built by `loader` on first use.
    pub fn with_recognizer(catalog: Arc<EntityCatalog>, loader: RecognizerLoader) -> Self {
        Self {
            catalog,
            loader: Some(loader),
            state: RwLock::new(RecognizerState::Cold),
        }
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn status(&self) -> RecognizerStatus {
        if self.loader.is_none() {
            return RecognizerStatus::Disabled;
        }
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            RecognizerState::Cold => RecognizerStatus::Cold,
            RecognizerState::Ready(_) => RecognizerStatus::Ready,
            RecognizerState::Unavailable => RecognizerStatus::Unavailable,
        }
    }

    /// Load the recognizer now instead of on first detection.
    ///
    /// Idempotent; a failed load is not retried.
    pub fn warm_up(&self) -> RecognizerStatus {
        let _ = self.recognizer();
        self.status()
    }

    fn recognizer(&self) -> Option<Arc<dyn EntityRecognizer>> {
        let loader = self.loader.as_ref()?;

        // Fast path: already resolved
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            match &*state {
                RecognizerState::Ready(r) => return Some(Arc::clone(r)),
                RecognizerState::Unavailable => return None,
                RecognizerState::Cold => {}
            }
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        // Double-check after acquiring write lock
        match &*state {
            RecognizerState::Ready(r) => return Some(Arc::clone(r)),
            RecognizerState::Unavailable => return None,
            RecognizerState::Cold => {}
        }

        match loader() {
            Ok(recognizer) => {
                debug!(recognizer = recognizer.name(), "entity recognizer loaded");
                *state = RecognizerState::Ready(Arc::clone(&recognizer));
                Some(recognizer)
            }
            Err(e) => {
                warn!(error = %e, "entity recognizer unavailable, using substring matching");
                *state = RecognizerState::Unavailable;
                None
            }
        }
    }

    /// GPE, PERSON and ORG spans in `text`. Empty without a recognizer.
    pub fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        match self.recognizer() {
            Some(recognizer) => recognizer
                .recognize(text)
                .into_iter()
                .filter(|s| {
                    matches!(
                        s.label,
                        EntityLabel::Gpe | EntityLabel::Person | EntityLabel::Org
                    )
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `text` mentions `entity`. Unknown entities are never found.
    pub fn detect(&self, text: &str, entity: &str) -> DetectionResult {
        let recognized = self.recognize(text);
        self.detect_with_spans(text, entity, recognized)
    }

    /// Like [`detect`](Self::detect) with spans already produced by
    /// [`recognize`](Self::recognize), so one text can be checked against
    /// many entities with a single recognizer pass.
    pub fn detect_with_spans(
        &self,
        text: &str,
        entity: &str,
        recognized: Vec<EntitySpan>,
    ) -> DetectionResult {
        let Some(aliases) = self.catalog.aliases(entity) else {
            debug!(entity, "unknown entity");
            return DetectionResult::not_found();
        };
        let needles: Vec<String> = aliases
            .iter()
            .map(|a| a.to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        let matched: Vec<EntitySpan> = recognized
            .iter()
            .filter(|span| {
                let span_text = span.text.to_lowercase();
                needles.iter().any(|n| span_text.contains(n.as_str()))
            })
            .cloned()
            .collect();
        if !matched.is_empty() {
            return found(DetectionMethod::Recognizer, matched, recognized);
        }

        let keywords = keyword_spans(text, &needles);
        if !keywords.is_empty() {
            return found(DetectionMethod::Substring, keywords, recognized);
        }

        DetectionResult {
            recognized,
            ..DetectionResult::not_found()
        }
    }
}

fn found(
    method: DetectionMethod,
    matched_spans: Vec<EntitySpan>,
    recognized: Vec<EntitySpan>,
) -> DetectionResult {
    metrics::counter!(telemetry::DETECTIONS_TOTAL, "method" => method.as_str()).increment(1);
    DetectionResult {
        found: true,
        method: Some(method),
        matched_spans,
        recognized,
    }
}

/// Case-insensitive occurrences of lowercase `needles` in `text`.
fn keyword_spans(text: &str, needles: &[String]) -> Vec<EntitySpan> {
    // Lowercasing can change byte lengths, so track which original char
    // each folded byte came from.
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (idx, c) in text.chars().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.extend(iter::repeat_n(idx, lower.len_utf8()));
        }
    }
    let char_bytes: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(iter::once(text.len()))
        .collect();

    let mut spans = Vec::new();
    for needle in needles {
        for (at, hit) in folded.match_indices(needle.as_str()) {
            let start = origin[at];
            let end = origin[at + hit.len() - 1] + 1;
            spans.push(EntitySpan::new(
                &text[char_bytes[start]..char_bytes[end]],
                EntityLabel::Keyword,
                start,
                end,
            ));
        }
    }
    spans.sort_by_key(|s| (s.start, s.end));
    spans.dedup();
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForsetiError;

    fn detector() -> EntityDetector {
        EntityDetector::new(Arc::new(EntityCatalog::standard()))
    }

    #[test]
    fn substring_only_detector_is_disabled() {
        assert_eq!(detector().status(), RecognizerStatus::Disabled);
        assert_eq!(detector().warm_up(), RecognizerStatus::Disabled);
    }

    #[test]
    fn keyword_spans_respect_char_offsets() {
        let spans = keyword_spans("Ärger in MOSCOW", &["moscow".to_string()]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "MOSCOW");
        assert_eq!((spans[0].start, spans[0].end), (9, 15));
    }

    #[test]
    fn unknown_entity_is_not_found() {
        let result = detector().detect("France is lovely", "france");
        assert!(!result.found);
        assert!(result.method.is_none());
    }

    #[test]
    fn failed_loader_falls_back_and_is_not_retried() {
        let calls = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let loader: RecognizerLoader = Arc::new(move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(ForsetiError::RecognizerUnavailable("no model".into()))
        });
        let detector = EntityDetector::with_recognizer(Arc::new(EntityCatalog::standard()), loader);
        assert_eq!(detector.status(), RecognizerStatus::Cold);

        assert_eq!(detector.warm_up(), RecognizerStatus::Unavailable);
        assert_eq!(detector.warm_up(), RecognizerStatus::Unavailable);
        let result = detector.detect("Beijing announced a plan", "china");
        assert!(result.found);
        assert_eq!(result.method, Some(DetectionMethod::Substring));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
