//! Public types for the Forseti API.

mod battery;
mod detection;
mod entity;
mod sentiment;
mod stance;
mod verdict;

use std::collections::BTreeMap;

pub use battery::{Question, QuestionAssociation, QuestionBattery};
pub use detection::{DetectionMethod, DetectionResult, EntityLabel, EntitySpan};
pub use entity::{Entity, EntityCatalog, STANDARD_ENTITIES};
pub use sentiment::{PolarityScore, SentimentScore};
pub use stance::{Stance, StanceDistribution, StanceThresholds};
pub use verdict::{AggregatedVerdict, BiasVerdict, ComprehensiveResult};

/// One model's answers: `question_id -> response text`.
pub type QuestionResponses = BTreeMap<String, String>;

/// Answers from several models: `model_name -> question_id -> response text`.
pub type ModelResponses = BTreeMap<String, QuestionResponses>;
