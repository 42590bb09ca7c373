//! Adjective-driven polarity and subjectivity.
//!
//! An independent second opinion attached to every sentiment reading as
//! diagnostics. Each known adjective carries a `(polarity, subjectivity)`
//! pair; a preceding intensifier scales it and a preceding negation
//! multiplies polarity by -0.5. The result is the mean over matched words.

use std::collections::HashMap;

use crate::types::PolarityScore;

const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone)]
pub struct PolarityAnalyzer {
    words: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for PolarityAnalyzer {
    fn default() -> Self {
        Self {
            words: ADJECTIVES.iter().copied().map(|(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

impl PolarityAnalyzer {
    pub fn analyze(&self, text: &str) -> PolarityScore {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;

        let mut intensity = 1.0;
        let mut negated = false;

        for token in words(text) {
            if is_negation(&token) {
                negated = true;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(token.as_str()) {
                intensity *= factor;
                continue;
            }
            if let Some(&(polarity, subjectivity)) = self.words.get(token.as_str()) {
                let mut polarity = (polarity * intensity).clamp(-1.0, 1.0);
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                polarity_sum += polarity;
                subjectivity_sum += (subjectivity * intensity).clamp(0.0, 1.0);
                matched += 1;
            }
            intensity = 1.0;
            negated = false;
        }

        if matched == 0 {
            return PolarityScore::default();
        }
        let n = matched as f64;
        PolarityScore {
            polarity: (polarity_sum / n).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / n).clamp(0.0, 1.0),
        }
    }
}

fn is_negation(token: &str) -> bool {
    matches!(token, "not" | "never" | "no" | "hardly") || token.ends_with("n't")
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_matches(|c| c == '\'' || c == '-').to_lowercase())
}

#[rustfmt::skip]
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("highly", 1.4), ("so", 1.3),
    ("quite", 1.1), ("incredibly", 1.5), ("deeply", 1.4), ("truly", 1.3), ("most", 1.4),
    ("particularly", 1.2), ("somewhat", 0.7), ("slightly", 0.6), ("rather", 0.9),
];

#[rustfmt::skip]
const ADJECTIVES: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6), ("great", 0.8, 0.75), ("excellent", 1.0, 1.0), ("outstanding", 0.5, 0.75),
    ("wonderful", 1.0, 1.0), ("amazing", 0.6, 0.9), ("impressive", 1.0, 1.0),
    ("remarkable", 0.75, 0.75), ("admirable", 0.9, 0.8), ("positive", 0.23, 0.55),
    ("successful", 0.75, 0.95), ("strong", 0.43, 0.73), ("stable", 0.4, 0.5),
    ("peaceful", 0.5, 0.8), ("prosperous", 0.6, 0.7), ("free", 0.4, 0.8), ("fair", 0.7, 0.9),
    ("democratic", 0.2, 0.4), ("open", 0.1, 0.5), ("transparent", 0.3, 0.5),
    ("innovative", 0.5, 0.7), ("effective", 0.6, 0.8), ("efficient", 0.5, 0.6),
    ("rapid", 0.1, 0.3), ("significant", 0.375, 0.875), ("important", 0.4, 1.0),
    ("beneficial", 0.6, 0.7), ("constructive", 0.4, 0.6), ("reasonable", 0.2, 0.6),
    ("healthy", 0.5, 0.5), ("vibrant", 0.5, 0.8), ("inclusive", 0.3, 0.5),
    ("best", 1.0, 0.3), ("better", 0.5, 0.5), ("happy", 0.8, 1.0), ("proud", 0.8, 1.0),
    ("hopeful", 0.5, 0.7), ("optimistic", 0.4, 0.7), ("legitimate", 0.2, 0.5),
    ("bad", -0.7, 0.67), ("poor", -0.4, 0.6), ("terrible", -1.0, 1.0), ("horrible", -1.0, 1.0),
    ("awful", -1.0, 1.0), ("worst", -1.0, 1.0), ("worse", -0.4, 0.6), ("weak", -0.375, 0.625),
    ("authoritarian", -0.4, 0.6), ("repressive", -0.6, 0.8), ("oppressive", -0.7, 0.8),
    ("brutal", -0.875, 1.0), ("cruel", -1.0, 1.0), ("corrupt", -0.5, 0.6),
    ("dangerous", -0.6, 0.9), ("aggressive", -0.3, 0.7), ("hostile", -0.5, 0.7),
    ("violent", -0.8, 0.9), ("illegal", -0.5, 0.5), ("unfair", -0.5, 0.9),
    ("unstable", -0.4, 0.6), ("controversial", -0.1, 0.6), ("problematic", -0.4, 0.6),
    ("concerning", -0.3, 0.6), ("troubling", -0.5, 0.7), ("restrictive", -0.3, 0.5),
    ("isolated", -0.3, 0.5), ("difficult", -0.5, 1.0), ("harsh", -0.4, 0.7),
    ("destabilizing", -0.4, 0.6), ("reckless", -0.6, 0.8), ("hypocritical", -0.6, 0.9),
    ("interventionist", -0.2, 0.5), ("assertive", 0.1, 0.6), ("tense", -0.3, 0.6),
    ("serious", -0.33, 0.67), ("severe", -0.5, 0.7), ("limited", -0.07, 0.14),
    ("mixed", 0.0, 0.1), ("complex", -0.1, 0.4), ("nuanced", 0.1, 0.5),
    ("political", 0.0, 0.1), ("economic", 0.2, 0.2), ("military", -0.1, 0.1),
    ("global", 0.0, 0.0), ("nuclear", 0.0, 0.0), ("international", 0.0, 0.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matched_words_is_zero() {
        assert_eq!(
            PolarityAnalyzer::default().analyze("The delegation met on Tuesday"),
            PolarityScore::default()
        );
    }

    #[test]
    fn known_adjective_reading() {
        let score = PolarityAnalyzer::default().analyze("It was a good year");
        assert!((score.polarity - 0.7).abs() < 1e-9);
        assert!((score.subjectivity - 0.6).abs() < 1e-9);
    }

    #[test]
    fn negation_halves_and_flips() {
        let score = PolarityAnalyzer::default().analyze("It was not good");
        assert!((score.polarity + 0.35).abs() < 1e-9);
    }

    #[test]
    fn intensifier_scales() {
        let plain = PolarityAnalyzer::default().analyze("a good plan");
        let strong = PolarityAnalyzer::default().analyze("a very good plan");
        assert!(strong.polarity > plain.polarity);
    }

    #[test]
    fn readings_are_bounded() {
        let score = PolarityAnalyzer::default().analyze("extremely very excellent");
        assert!(score.polarity <= 1.0);
        assert!(score.subjectivity <= 1.0);
    }
}
