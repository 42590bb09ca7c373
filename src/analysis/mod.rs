//! Bias analysis: per-text evaluation, multi-question aggregation and
//! report rendering.

mod aggregate;
mod builder;
mod evaluator;
mod report;

pub use aggregate::{ConfidenceDenominator, MultiQuestionAnalyzer};
pub use builder::{AnalyzerConfig, Forseti, ForsetiBuilder};
pub use evaluator::BiasEvaluator;
pub use report::{render_comparison, render_report};
