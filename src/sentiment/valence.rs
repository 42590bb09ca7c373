//! Rule-based valence scoring.
//!
//! Sums per-token lexicon valences adjusted by boosters, negation,
//! ALL-CAPS emphasis, contrastive "but" and trailing punctuation, then
//! normalizes the sum into a compound score in `[-1, 1]`.

use crate::types::SentimentScore;

use super::lexicon::{ValenceLexicon, booster, is_negation};

/// Valence added to an ALL-CAPS word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier applied to a negated valence.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant approximating the maximum expected sum.
const NORMALIZATION_ALPHA: f64 = 15.0;
/// Per-`!` emphasis, capped at four marks.
const EXCLAMATION_INCREMENT: f64 = 0.292;
/// Per-`?` emphasis for two or three marks.
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Computes VADER-style positive/negative/neutral proportions and a
/// compound score.
#[derive(Debug, Clone, Default)]
pub struct ValenceAnalyzer {
    lexicon: ValenceLexicon,
}

impl ValenceAnalyzer {
    pub fn new(lexicon: ValenceLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &ValenceLexicon {
        &self.lexicon
    }

    /// Score `text`. Diagnostics are left at their defaults.
    pub fn analyze(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScore::neutral();
        }
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_diff = cap_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            if booster(&lower[i]).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if lower[i] == "kind" && lower.get(i + 1).is_some_and(|w| w == "of") {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence_at(&tokens, &lower, i, cap_diff));
        }

        but_shift(&lower, &mut sentiments);
        score(&sentiments, text)
    }

    fn valence_at(&self, tokens: &[&str], lower: &[String], i: usize, cap_diff: bool) -> f64 {
        let Some(mut valence) = self.lexicon.get(&lower[i]) else {
            return 0.0;
        };

        if cap_diff && is_upper(tokens[i]) {
            valence += signed(CAPS_INCREMENT, valence);
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let prior = &lower[i - distance];
            if self.lexicon.contains(prior) {
                continue;
            }
            let mut scalar = booster_shift(tokens[i - distance], prior, valence, cap_diff);
            if distance == 2 {
                scalar *= 0.95;
            } else if distance == 3 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lower, distance, i);
        }

        self.least_check(valence, lower, i)
    }

    /// "least X" flips X unless it reads "at least" or "very least".
    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i == 0 || lower[i - 1] != "least" || self.lexicon.contains(&lower[i - 1]) {
            return valence;
        }
        if i > 1 && (lower[i - 2] == "at" || lower[i - 2] == "very") {
            return valence;
        }
        valence * NEGATION_SCALAR
    }
}

fn signed(magnitude: f64, valence: f64) -> f64 {
    if valence > 0.0 { magnitude } else { -magnitude }
}

fn booster_shift(raw: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_upper(raw) {
        scalar += signed(CAPS_INCREMENT, valence);
    }
    scalar
}

fn negation_check(valence: f64, lower: &[String], distance: usize, i: usize) -> f64 {
    let is_so_this = |w: &str| w == "so" || w == "this";
    match distance {
        1 => {
            if is_negation(&lower[i - 1]) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
        2 => {
            let (far, near) = (lower[i - 2].as_str(), lower[i - 1].as_str());
            if far == "never" && is_so_this(near) {
                valence * 1.25
            } else if far == "without" && near == "doubt" {
                valence
            } else if is_negation(far) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
        _ => {
            let (far, mid, near) = (
                lower[i - 3].as_str(),
                lower[i - 2].as_str(),
                lower[i - 1].as_str(),
            );
            if far == "never" && (is_so_this(mid) || is_so_this(near)) {
                valence * 1.25
            } else if far == "without" && (mid == "doubt" || near == "doubt") {
                valence
            } else if is_negation(far) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
    }
}

/// Dampen sentiment before the first "but" and amplify it after.
fn but_shift(lower: &[String], sentiments: &mut [f64]) {
    let Some(pivot) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < pivot {
            *sentiment *= 0.5;
        } else if idx > pivot {
            *sentiment *= 1.5;
        }
    }
}

fn score(sentiments: &[f64], text: &str) -> SentimentScore {
    let amplifier = punctuation_emphasis(text);

    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += amplifier;
    } else if sum < 0.0 {
        sum -= amplifier;
    }
    let compound = round4(normalize(sum));

    let (mut positive, mut negative, neutral_count) = sift(sentiments);
    if positive > negative.abs() {
        positive += amplifier;
    } else if positive < negative.abs() {
        negative -= amplifier;
    }

    let total = positive + negative.abs() + neutral_count;
    if total == 0.0 {
        return SentimentScore::neutral();
    }

    SentimentScore {
        positive: (positive / total).abs(),
        negative: (negative / total).abs(),
        neutral: (neutral_count / total).abs(),
        compound,
        diagnostics: Default::default(),
    }
}

fn sift(sentiments: &[f64]) -> (f64, f64, f64) {
    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            positive += s + 1.0;
        } else if s < 0.0 {
            negative += s - 1.0;
        } else {
            neutral += 1.0;
        }
    }
    (positive, negative, neutral)
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };
    exclamations * EXCLAMATION_INCREMENT + question_emphasis
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Whitespace tokens with surrounding punctuation stripped. Short
/// punctuation-heavy tokens (emoticons) are kept whole; single-character
/// tokens are dropped.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|raw| {
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                raw
            } else {
                stripped
            }
        })
        .filter(|token| token.chars().count() > 1)
        .collect()
}

fn is_upper(token: &str) -> bool {
    let mut cased = token.chars().filter(|c| c.is_alphabetic()).peekable();
    cased.peek().is_some() && cased.all(|c| c.is_uppercase())
}

/// True when some but not all tokens are ALL-CAPS.
fn cap_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_upper(t)).count();
    caps > 0 && caps < tokens.len()
}
