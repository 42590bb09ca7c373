//! Single-response bias evaluation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::detect::EntityDetector;
use crate::sentiment::SentimentModel;
use crate::telemetry;
use crate::types::{BiasVerdict, DetectionResult, SentimentScore, StanceThresholds};

/// Combines entity detection and sentiment scoring into bias verdicts.
///
/// Infallible: a text that does not mention an entity yields a
/// `target_found: false` verdict, never an error.
#[derive(Clone)]
pub struct BiasEvaluator {
    detector: Arc<EntityDetector>,
    scorer: Arc<dyn SentimentModel>,
    thresholds: StanceThresholds,
}

impl std::fmt::Debug for BiasEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiasEvaluator")
            .field("detector", &self.detector)
            .field("scorer", &self.scorer.name())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl BiasEvaluator {
    pub fn new(
        detector: Arc<EntityDetector>,
        scorer: Arc<dyn SentimentModel>,
        thresholds: StanceThresholds,
    ) -> Self {
        Self {
            detector,
            scorer,
            thresholds,
        }
    }

    pub fn detector(&self) -> &EntityDetector {
        &self.detector
    }

    pub fn thresholds(&self) -> StanceThresholds {
        self.thresholds
    }

    /// Bias verdict for one entity in one text.
    pub fn evaluate(&self, text: &str, entity: &str) -> BiasVerdict {
        let detection = self.detector.detect(text, entity);
        let mut score = None;
        self.verdict(text, entity, detection, &mut score)
    }

    /// Verdicts for every catalog entity, absent entities included.
    ///
    /// The recognizer and the scorer each run at most once per text.
    pub fn evaluate_all_entities(&self, text: &str) -> BTreeMap<String, BiasVerdict> {
        let recognized = self.detector.recognize(text);
        let mut score = None;
        self.detector
            .catalog()
            .ids()
            .map(|entity| {
                let detection = self
                    .detector
                    .detect_with_spans(text, entity, recognized.clone());
                let verdict = self.verdict(text, entity, detection, &mut score);
                (entity.to_string(), verdict)
            })
            .collect()
    }

    /// Per-model verdicts for a `model_name -> text` mapping. Models are
    /// evaluated independently.
    pub fn compare_models(
        &self,
        responses: &BTreeMap<String, String>,
    ) -> BTreeMap<String, BTreeMap<String, BiasVerdict>> {
        responses
            .iter()
            .map(|(model, text)| (model.clone(), self.evaluate_all_entities(text)))
            .collect()
    }

    fn verdict(
        &self,
        text: &str,
        entity: &str,
        detection: DetectionResult,
        score: &mut Option<SentimentScore>,
    ) -> BiasVerdict {
        if !detection.found {
            metrics::counter!(
                telemetry::EVALUATIONS_TOTAL,
                "entity" => entity.to_string(),
                "outcome" => "not_found"
            )
            .increment(1);
            debug!(entity, "target not found");
            return BiasVerdict::not_found();
        }

        let sentiment = *score.get_or_insert_with(|| self.scorer.score(text));
        let stance = self.thresholds.classify(sentiment.compound);

        metrics::counter!(
            telemetry::EVALUATIONS_TOTAL,
            "entity" => entity.to_string(),
            "outcome" => "found"
        )
        .increment(1);
        debug!(
            entity,
            method = detection.method.map(|m| m.as_str()),
            bias_score = sentiment.compound,
            %stance,
            "target evaluated"
        );

        BiasVerdict {
            target_found: true,
            bias_score: sentiment.compound,
            stance,
            sentiment_detail: Some(sentiment),
            entities: detection.recognized,
        }
    }
}
