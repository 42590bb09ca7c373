//! Bias verdict types produced by the analyzers.
//!
//! [`BiasVerdict`] is the ephemeral per-text result; [`AggregatedVerdict`] and
//! [`ComprehensiveResult`] are the durable outputs of an analysis run and
//! serialize with stable field names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EntitySpan, SentimentScore, Stance, StanceDistribution};

/// One entity's bias verdict for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasVerdict {
    pub target_found: bool,
    /// Compound sentiment of the text, 0 when the target is absent.
    pub bias_score: f64,
    pub stance: Stance,
    /// Full sentiment reading, `None` when the target is absent.
    pub sentiment_detail: Option<SentimentScore>,
    /// Recognized GPE/PERSON/ORG spans in the text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntitySpan>,
}

impl BiasVerdict {
    /// Verdict for a text that does not mention the entity.
    pub fn not_found() -> Self {
        Self {
            target_found: false,
            bias_score: 0.0,
            stance: Stance::Neutral,
            sentiment_detail: None,
            entities: Vec::new(),
        }
    }
}

/// One model's verdict on one entity across a set of battery questions.
///
/// The optional fields are absent when no response mentioned the entity
/// (see [`insufficient`](Self::insufficient)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedVerdict {
    pub target_found: bool,
    /// Mean of the weighted per-question bias scores.
    pub overall_bias_score: f64,
    pub overall_stance: Stance,
    /// Qualifying responses over the confidence denominator, in `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance_distribution: Option<StanceDistribution>,
    /// Weighted scores in response order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_scores: Option<Vec<f64>>,
}

impl AggregatedVerdict {
    /// Terminal verdict when no response provided usable evidence.
    pub fn insufficient() -> Self {
        Self {
            target_found: false,
            overall_bias_score: 0.0,
            overall_stance: Stance::Neutral,
            confidence: 0.0,
            response_count: None,
            stance_distribution: None,
            individual_scores: None,
        }
    }
}

/// Per-model, per-entity aggregated verdicts: `model -> entity -> verdict`.
///
/// Serializes as a plain nested JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComprehensiveResult {
    models: BTreeMap<String, BTreeMap<String, AggregatedVerdict>>,
}

impl ComprehensiveResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace all entity verdicts for a model.
    pub fn insert_model(
        &mut self,
        model: impl Into<String>,
        verdicts: BTreeMap<String, AggregatedVerdict>,
    ) {
        self.models.insert(model.into(), verdicts);
    }

    pub fn get(&self, model: &str, entity: &str) -> Option<&AggregatedVerdict> {
        self.models.get(model).and_then(|m| m.get(entity))
    }

    pub fn model(&self, model: &str) -> Option<&BTreeMap<String, AggregatedVerdict>> {
        self.models.get(model)
    }

    /// Model names in sorted order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, AggregatedVerdict>)> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_verdict_omits_counts() {
        let json = serde_json::to_value(AggregatedVerdict::insufficient()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target_found": false,
                "overall_bias_score": 0.0,
                "overall_stance": "neutral",
                "confidence": 0.0,
            })
        );
    }

    #[test]
    fn not_found_verdict_has_null_detail() {
        let json = serde_json::to_value(BiasVerdict::not_found()).unwrap();
        assert_eq!(json["sentiment_detail"], serde_json::Value::Null);
        assert!(json.get("entities").is_none());
    }

    #[test]
    fn comprehensive_result_is_nested_object() {
        let mut result = ComprehensiveResult::new();
        let mut verdicts = BTreeMap::new();
        verdicts.insert("china".to_string(), AggregatedVerdict::insufficient());
        result.insert_model("GPT-4", verdicts);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["GPT-4"]["china"]["target_found"], false);
        assert!(result.get("GPT-4", "china").is_some());
        assert!(result.get("GPT-4", "usa").is_none());
    }
}
