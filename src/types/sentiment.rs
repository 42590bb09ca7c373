//! Sentiment score types.

use serde::{Deserialize, Serialize};

/// Sentiment of a text.
///
/// `positive`, `negative` and `neutral` are proportions summing to 1;
/// `compound` is the normalized overall polarity in `[-1, 1]` and is the only
/// component the bias math consumes. `diagnostics` comes from an independent
/// analyzer and is attached for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
    pub diagnostics: PolarityScore,
}

impl SentimentScore {
    /// Fully neutral score, used for text with no scorable tokens.
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
            diagnostics: PolarityScore::default(),
        }
    }
}

/// Secondary polarity/subjectivity reading of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScore {
    /// Mean polarity in `[-1, 1]`.
    pub polarity: f64,
    /// Mean subjectivity in `[0, 1]`; 0 is factual, 1 is opinionated.
    pub subjectivity: f64,
}
