//! Stance types.
//!
//! A stance is the categorical sign of a bias score: whether text about an
//! entity reads as favourable, unfavourable or neither.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The categorical stance toward an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// Bias score above the positive threshold.
    Positive,
    /// Bias score below the negative threshold.
    Negative,
    /// Anything in between, including both boundaries.
    Neutral,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Positive => "positive",
            Stance::Negative => "negative",
            Stance::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score thresholds mapping a bias score to a [`Stance`].
///
/// Boundaries are exclusive: a score equal to a threshold is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for StanceThresholds {
    fn default() -> Self {
        Self {
            positive: 0.1,
            negative: -0.1,
        }
    }
}

impl StanceThresholds {
    pub fn classify(&self, score: f64) -> Stance {
        if score > self.positive {
            Stance::Positive
        } else if score < self.negative {
            Stance::Negative
        } else {
            Stance::Neutral
        }
    }
}

/// Count of stances across a set of verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl StanceDistribution {
    pub fn record(&mut self, stance: Stance) {
        match stance {
            Stance::Positive => self.positive += 1,
            Stance::Negative => self.negative += 1,
            Stance::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Majority stance between positive and negative counts.
    ///
    /// The neutral count never participates: a positive/negative tie,
    /// including zero/zero, resolves to neutral.
    pub fn majority(&self) -> Stance {
        match self.positive.cmp(&self.negative) {
            std::cmp::Ordering::Greater => Stance::Positive,
            std::cmp::Ordering::Less => Stance::Negative,
            std::cmp::Ordering::Equal => Stance::Neutral,
        }
    }
}

impl fmt::Display for StanceDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "positive: {}, negative: {}, neutral: {}",
            self.positive, self.negative, self.neutral
        )
    }
}
