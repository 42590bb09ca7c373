//! Sentiment scoring.
//!
//! [`SentimentModel`] is the seam the bias evaluator scores through. The
//! default [`LexiconSentiment`] combines the rule-based [`ValenceAnalyzer`]
//! (which drives the compound score) with the independent
//! [`PolarityAnalyzer`] (attached as diagnostics).

mod lexicon;
mod polarity;
mod valence;

pub use lexicon::ValenceLexicon;
pub use polarity::PolarityAnalyzer;
pub use valence::ValenceAnalyzer;

use crate::types::SentimentScore;

/// Scores the sentiment of a text.
///
/// Implementations must be total: empty or unscorable text yields
/// [`SentimentScore::neutral`], never an error.
pub trait SentimentModel: Send + Sync {
    /// Model name for logging.
    fn name(&self) -> &str;

    fn score(&self, text: &str) -> SentimentScore;
}

/// Lexicon-and-rule sentiment model.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment {
    valence: ValenceAnalyzer,
    polarity: PolarityAnalyzer,
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `lexicon` for valence scoring instead of the built-in word list.
    pub fn with_lexicon(lexicon: ValenceLexicon) -> Self {
        Self {
            valence: ValenceAnalyzer::new(lexicon),
            polarity: PolarityAnalyzer::default(),
        }
    }
}

impl SentimentModel for LexiconSentiment {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> SentimentScore {
        let mut score = self.valence.analyze(text);
        score.diagnostics = self.polarity.analyze(text);
        score
    }
}
