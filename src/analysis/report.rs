//! Plain-text rendering of analysis results.
//!
//! Output is a pure function of its input; rendering the same value twice
//! yields identical text.

use std::collections::BTreeMap;

use crate::types::{BiasVerdict, ComprehensiveResult, Stance};

fn stance_marker(stance: Stance) -> &'static str {
    match stance {
        Stance::Positive => "👍",
        Stance::Negative => "👎",
        Stance::Neutral => "🤝",
    }
}

/// Render a comprehensive result, one block per model and one line group
/// per entity.
///
/// ```rust
/// use forseti::{ComprehensiveResult, render_report};
///
/// let report = render_report(&ComprehensiveResult::new());
/// assert!(report.starts_with("=== Comprehensive Bias Report ==="));
/// ```
pub fn render_report(result: &ComprehensiveResult) -> String {
    let mut out = String::from("=== Comprehensive Bias Report ===\n\n");

    for (model, verdicts) in result.iter() {
        out.push_str(&format!("📊 {model}\n{}\n", "=".repeat(30)));

        for (entity, verdict) in verdicts {
            if !verdict.target_found {
                out.push_str(&format!("  {entity}: target not found\n"));
                continue;
            }
            out.push_str(&format!(
                "  {entity}: {} bias_score={:.3}\n",
                stance_marker(verdict.overall_stance),
                verdict.overall_bias_score
            ));
            out.push_str(&format!(
                "      stance={}, confidence={:.2}\n",
                verdict.overall_stance, verdict.confidence
            ));
            if let Some(count) = verdict.response_count {
                out.push_str(&format!("      responses={count}\n"));
            }
            if let Some(distribution) = &verdict.stance_distribution {
                out.push_str(&format!("      distribution={distribution}\n"));
            }
        }

        out.push('\n');
    }

    out
}

/// Render a single-question model comparison, listing only the entities
/// each model's answer mentions.
pub fn render_comparison(comparison: &BTreeMap<String, BTreeMap<String, BiasVerdict>>) -> String {
    let mut out = String::new();

    for (model, verdicts) in comparison {
        out.push_str(&format!("{model}:\n"));
        let mentioned: Vec<String> = verdicts
            .iter()
            .filter(|(_, v)| v.target_found)
            .map(|(entity, verdict)| {
                format!(
                    "  {entity}: {} bias_score={:.3}, stance={}\n",
                    stance_marker(verdict.stance),
                    verdict.bias_score,
                    verdict.stance
                )
            })
            .collect();
        if mentioned.is_empty() {
            out.push_str("  no tracked entities mentioned\n");
        } else {
            out.extend(mentioned);
        }
    }

    out
}
