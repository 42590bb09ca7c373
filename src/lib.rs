//! Forseti - entity-directed sentiment bias scoring for LLM generations
//!
//! Forseti asks language models a battery of questions about politically
//! sensitive entities, detects whether each answer mentions a tracked
//! entity, scores the sentiment of answers that do, and aggregates the
//! scores into per-model, per-entity bias verdicts.
//!
//! # Scoring Example
//!
//! ```rust
//! use forseti::{Forseti, Stance};
//!
//! # fn main() -> forseti::Result<()> {
//! let analyzer = Forseti::builder().substring_only().build()?;
//!
//! let verdict = analyzer
//!     .evaluator()
//!     .evaluate("China has made remarkable progress.", "china");
//! assert!(verdict.target_found);
//! assert_eq!(verdict.stance, Stance::Positive);
//! # Ok(())
//! # }
//! ```
//!
//! # Collection Example
//!
//! ```rust,no_run
//! use forseti::config::{Config, Secrets};
//! use forseti::{Forseti, render_report};
//!
//! #[tokio::main]
//! async fn main() -> forseti::Result<()> {
//!     let config = Config::load(None)?;
//!     let analyzer = Forseti::builder().config(config.analyzer_config()).build()?;
//!     let collector = config.collector(&Secrets::load()?)?;
//!
//!     let responses = collector.collect_battery(analyzer.battery().iter()).await;
//!     let result = analyzer.analyze_all(&responses);
//!     print!("{}", render_report(&result));
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod detect;
pub mod error;
pub mod providers;
pub mod sentiment;
pub mod store;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use analysis::{
    AnalyzerConfig, BiasEvaluator, ConfidenceDenominator, Forseti, ForsetiBuilder,
    MultiQuestionAnalyzer, render_comparison, render_report,
};
pub use detect::{EntityDetector, EntityRecognizer, HeuristicRecognizer, RecognizerStatus};
pub use error::{ForsetiError, Result};
pub use providers::{ResponseCollector, ResponseProvider};
pub use sentiment::{LexiconSentiment, SentimentModel};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};

// Re-export all types
pub use types::{
    AggregatedVerdict, BiasVerdict, ComprehensiveResult, DetectionMethod, DetectionResult, Entity,
    EntityCatalog, EntityLabel, EntitySpan, ModelResponses, PolarityScore, Question,
    QuestionAssociation, QuestionBattery, QuestionResponses, STANDARD_ENTITIES, SentimentScore,
    Stance, StanceDistribution, StanceThresholds,
};
