//! Builder for configuring analyzer instances.

use std::sync::Arc;

use crate::detect::{EntityDetector, HeuristicRecognizer, RecognizerLoader};
use crate::sentiment::{LexiconSentiment, SentimentModel};
use crate::types::{EntityCatalog, QuestionAssociation, QuestionBattery, StanceThresholds};
use crate::{ForsetiError, Result};

use super::aggregate::{ConfidenceDenominator, MultiQuestionAnalyzer};
use super::evaluator::BiasEvaluator;

/// Immutable analysis configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerConfig {
    pub catalog: EntityCatalog,
    pub battery: QuestionBattery,
    pub thresholds: StanceThresholds,
    pub confidence: ConfidenceDenominator,
    pub association: QuestionAssociation,
}

impl AnalyzerConfig {
    /// The standard catalog and battery with default thresholds.
    pub fn standard() -> Self {
        Self {
            catalog: EntityCatalog::standard(),
            battery: QuestionBattery::standard(),
            ..Self::default()
        }
    }

    /// Check the configuration for values the analyzer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(invalid("entity catalog is empty"));
        }
        for entity in self.catalog.iter() {
            if entity.aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(invalid(format!("entity '{}' has no aliases", entity.id)));
            }
        }

        if self.battery.is_empty() {
            return Err(invalid("question battery is empty"));
        }
        for question in self.battery.iter() {
            if !question.weight.is_finite() || question.weight <= 0.0 {
                return Err(invalid(format!(
                    "question '{}' has invalid weight {}",
                    question.id, question.weight
                )));
            }
            if self.association == QuestionAssociation::Explicit
                && let Some(unknown) = question.entities.iter().find(|e| !self.catalog.contains(e))
            {
                return Err(invalid(format!(
                    "question '{}' targets unknown entity '{unknown}'",
                    question.id
                )));
            }
        }

        let StanceThresholds { positive, negative } = self.thresholds;
        if !positive.is_finite() || !negative.is_finite() || negative > positive {
            return Err(invalid(format!(
                "stance thresholds must satisfy negative <= positive (got {negative}, {positive})"
            )));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ForsetiError {
    ForsetiError::Configuration(msg.into())
}

/// Main entry point for creating analyzers.
pub struct Forseti;

impl Forseti {
    /// Create a new builder for configuring an analyzer.
    ///
    /// ```rust
    /// use forseti::Forseti;
    ///
    /// let analyzer = Forseti::builder().build().unwrap();
    /// let verdict = analyzer.evaluator().evaluate("Moscow issued a statement.", "russia");
    /// assert!(verdict.target_found);
    /// ```
    pub fn builder() -> ForsetiBuilder {
        ForsetiBuilder::new()
    }
}

/// Builder for configuring analyzer instances.
pub struct ForsetiBuilder {
    config: AnalyzerConfig,
    scorer: Option<Arc<dyn SentimentModel>>,
    recognizer: Option<RecognizerLoader>,
    warm_up: bool,
}

impl ForsetiBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::standard(),
            scorer: None,
            recognizer: Some(HeuristicRecognizer::loader()),
            warm_up: false,
        }
    }

    /// Replace the whole analysis configuration.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(mut self, catalog: EntityCatalog) -> Self {
        self.config.catalog = catalog;
        self
    }

    pub fn battery(mut self, battery: QuestionBattery) -> Self {
        self.config.battery = battery;
        self
    }

    pub fn thresholds(mut self, thresholds: StanceThresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    pub fn confidence(mut self, confidence: ConfidenceDenominator) -> Self {
        self.config.confidence = confidence;
        self
    }

    pub fn association(mut self, association: QuestionAssociation) -> Self {
        self.config.association = association;
        self
    }

    /// Score sentiment with `scorer` instead of [`LexiconSentiment`].
    pub fn scorer(mut self, scorer: Arc<dyn SentimentModel>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Use a custom recognizer loader instead of the heuristic recognizer.
    pub fn recognizer_loader(mut self, loader: RecognizerLoader) -> Self {
        self.recognizer = Some(loader);
        self
    }

    /// Detect entities by alias substring only.
    pub fn substring_only(mut self) -> Self {
        self.recognizer = None;
        self
    }

    /// Load the recognizer during [`build`](Self::build) rather than on
    /// first detection.
    pub fn warm_up(mut self, warm_up: bool) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Validate the configuration and assemble the analyzer.
    pub fn build(self) -> Result<MultiQuestionAnalyzer> {
        self.config.validate()?;

        let AnalyzerConfig {
            catalog,
            battery,
            thresholds,
            confidence,
            association,
        } = self.config;

        let catalog = Arc::new(catalog);
        let detector = match self.recognizer {
            Some(loader) => EntityDetector::with_recognizer(catalog, loader),
            None => EntityDetector::new(catalog),
        };
        if self.warm_up {
            detector.warm_up();
        }

        let scorer = self
            .scorer
            .unwrap_or_else(|| Arc::new(LexiconSentiment::new()));
        let evaluator = BiasEvaluator::new(Arc::new(detector), scorer, thresholds);

        Ok(MultiQuestionAnalyzer::new(
            evaluator,
            Arc::new(battery),
            confidence,
            association,
        ))
    }
}

impl Default for ForsetiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid() {
        assert!(AnalyzerConfig::standard().validate().is_ok());
    }

    #[test]
    fn empty_config_is_rejected() {
        let err = AnalyzerConfig::default().validate().unwrap_err();
        assert!(matches!(err, ForsetiError::Configuration(_)));
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let battery = QuestionBattery::standard().with_question("china_extra", "?", 0.0);
        let result = Forseti::builder().battery(battery).build();
        assert!(matches!(result, Err(ForsetiError::Configuration(_))));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let result = Forseti::builder()
            .thresholds(StanceThresholds {
                positive: -0.2,
                negative: 0.2,
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn explicit_association_checks_entities() {
        let battery = QuestionBattery::new().with_targeted_question(
            "q1",
            "Thoughts on France?",
            1.0,
            ["france"],
        );
        let result = Forseti::builder()
            .battery(battery)
            .association(QuestionAssociation::Explicit)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn entity_targets_only_checked_for_explicit_association() {
        let unknown = QuestionBattery::new().with_targeted_question(
            "q1",
            "Thoughts on France?",
            1.0,
            ["france"],
        );
        assert!(Forseti::builder().battery(unknown).build().is_ok());

        let known = QuestionBattery::new().with_targeted_question(
            "q1",
            "Thoughts on China?",
            1.0,
            ["china"],
        );
        assert!(
            Forseti::builder()
                .battery(known)
                .association(QuestionAssociation::Explicit)
                .build()
                .is_ok()
        );
    }
}
