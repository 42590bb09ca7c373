//! Multi-question aggregation.
//!
//! Folds one model's answers to a question battery into a weighted
//! per-entity verdict, and runs that over every model and entity to build
//! a [`ComprehensiveResult`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::telemetry;
use crate::types::{
    AggregatedVerdict, ComprehensiveResult, EntityCatalog, ModelResponses, Question,
    QuestionAssociation, QuestionBattery, StanceDistribution,
};

use super::evaluator::BiasEvaluator;

/// Denominator of an aggregated verdict's confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceDenominator {
    /// Every question in the battery.
    #[default]
    WholeBattery,
    /// Only the battery questions associated with the entity.
    EntitySubset,
}

/// Aggregates bias verdicts across a question battery.
#[derive(Debug, Clone)]
pub struct MultiQuestionAnalyzer {
    evaluator: BiasEvaluator,
    battery: Arc<QuestionBattery>,
    confidence: ConfidenceDenominator,
    association: QuestionAssociation,
}

impl MultiQuestionAnalyzer {
    pub fn new(
        evaluator: BiasEvaluator,
        battery: Arc<QuestionBattery>,
        confidence: ConfidenceDenominator,
        association: QuestionAssociation,
    ) -> Self {
        Self {
            evaluator,
            battery,
            confidence,
            association,
        }
    }

    pub fn evaluator(&self) -> &BiasEvaluator {
        &self.evaluator
    }

    pub fn battery(&self) -> &QuestionBattery {
        &self.battery
    }

    pub fn catalog(&self) -> &EntityCatalog {
        self.evaluator.detector().catalog()
    }

    /// The whole battery, or only the questions associated with `entity`.
    pub fn question_set<'a>(&'a self, entity: Option<&'a str>) -> Vec<&'a Question> {
        match entity {
            Some(entity) => self
                .battery
                .questions_for(entity, self.association)
                .collect(),
            None => self.battery.iter().collect(),
        }
    }

    /// Weighted verdict for `entity` over `question_id -> text` pairs.
    ///
    /// Pairs whose id is not in the battery are skipped. Scores keep the
    /// iteration order of `responses`.
    pub fn aggregate<I, K, V>(&self, responses: I, entity: &str) -> AggregatedVerdict
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut weighted_scores = Vec::new();
        let mut distribution = StanceDistribution::default();

        for (question_id, text) in responses {
            let question_id = question_id.as_ref();
            let Some(weight) = self.battery.weight(question_id) else {
                debug!(question_id, "skipping question outside the battery");
                continue;
            };
            let verdict = self.evaluator.evaluate(text.as_ref(), entity);
            if verdict.target_found {
                weighted_scores.push(verdict.bias_score * weight);
                distribution.record(verdict.stance);
            }
        }

        if weighted_scores.is_empty() {
            self.record(entity, "insufficient");
            return AggregatedVerdict::insufficient();
        }

        let response_count = weighted_scores.len();
        let overall_bias_score = weighted_scores.iter().sum::<f64>() / response_count as f64;
        let overall_stance = distribution.majority();
        let confidence = self.confidence(entity, response_count);

        self.record(entity, "scored");
        debug!(
            entity,
            response_count,
            overall_bias_score,
            %overall_stance,
            confidence,
            "aggregated"
        );

        AggregatedVerdict {
            target_found: true,
            overall_bias_score,
            overall_stance,
            confidence,
            response_count: Some(response_count),
            stance_distribution: Some(distribution),
            individual_scores: Some(weighted_scores),
        }
    }

    /// Aggregate every model's answers for every catalog entity.
    ///
    /// Each entity only sees the questions associated with it; an entity
    /// with no associated answers gets the insufficient verdict.
    #[instrument(skip_all, fields(models = model_responses.len()))]
    pub fn analyze_all(&self, model_responses: &ModelResponses) -> ComprehensiveResult {
        let mut result = ComprehensiveResult::new();

        for (model, responses) in model_responses {
            let verdicts: BTreeMap<String, AggregatedVerdict> = self
                .catalog()
                .ids()
                .map(|entity| {
                    let subset: Vec<(&String, &String)> = responses
                        .iter()
                        .filter(|(qid, _)| self.battery.targets(qid, entity, self.association))
                        .collect();
                    let verdict = if subset.is_empty() {
                        self.record(entity, "insufficient");
                        AggregatedVerdict::insufficient()
                    } else {
                        self.aggregate(subset, entity)
                    };
                    (entity.to_string(), verdict)
                })
                .collect();

            let scored = verdicts.values().filter(|v| v.target_found).count();
            info!(model = %model, scored, entities = verdicts.len(), "model analyzed");
            result.insert_model(model.clone(), verdicts);
        }

        result
    }

    fn confidence(&self, entity: &str, response_count: usize) -> f64 {
        let denominator = match self.confidence {
            ConfidenceDenominator::WholeBattery => self.battery.len(),
            ConfidenceDenominator::EntitySubset => {
                self.battery.questions_for(entity, self.association).count()
            }
        };
        if denominator == 0 {
            return 0.0;
        }
        (response_count as f64 / denominator as f64).min(1.0)
    }

    fn record(&self, entity: &str, outcome: &'static str) {
        metrics::counter!(
            telemetry::AGGREGATIONS_TOTAL,
            "entity" => entity.to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }
}
