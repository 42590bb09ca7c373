use std::collections::BTreeMap;

use forseti::{Forseti, ModelResponses, QuestionResponses, render_comparison, render_report, store};

fn responses() -> ModelResponses {
    let mut gpt = QuestionResponses::new();
    gpt.insert(
        "russia_ukraine".into(),
        "Russia's invasion of Ukraine is brutal and devastating.".into(),
    );
    gpt.insert(
        "usa_democracy".into(),
        "The United States has a strong and vibrant democracy.".into(),
    );

    let mut claude = QuestionResponses::new();
    claude.insert("china_tech".into(), String::new());

    let mut responses = ModelResponses::new();
    responses.insert("GPT-4".into(), gpt);
    responses.insert("Claude".into(), claude);
    responses
}

#[test]
fn report_covers_every_model_and_entity() {
    let analyzer = Forseti::builder().substring_only().build().unwrap();
    let report = render_report(&analyzer.analyze_all(&responses()));

    assert!(report.starts_with("=== Comprehensive Bias Report ===\n\n"));
    // Models are listed in sorted order.
    let claude = report.find("📊 Claude").unwrap();
    let gpt = report.find("📊 GPT-4").unwrap();
    assert!(claude < gpt);

    assert!(report.contains("  russia: 👎 bias_score=-"));
    assert!(report.contains("  usa: 👍 bias_score=0."));
    assert!(report.contains("  china: target not found"));
    assert_eq!(report.matches("target not found").count(), 6);
    assert!(report.ends_with("\n\n"));
}

#[test]
fn report_from_saved_results_matches_live_report() {
    let analyzer = Forseti::builder().substring_only().build().unwrap();
    let result = analyzer.analyze_all(&responses());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    store::save_results(&path, &result).unwrap();
    let loaded = store::load_results(&path).unwrap();

    assert_eq!(render_report(&loaded), render_report(&result));
}

#[test]
fn empty_result_has_only_header() {
    let analyzer = Forseti::builder().substring_only().build().unwrap();
    let report = render_report(&analyzer.analyze_all(&ModelResponses::new()));
    assert_eq!(report, "=== Comprehensive Bias Report ===\n\n");
}

#[test]
fn comparison_lists_mentioned_entities() {
    let analyzer = Forseti::builder().substring_only().build().unwrap();
    let mut texts = BTreeMap::new();
    texts.insert(
        "DeepSeek".to_string(),
        "Beijing and Moscow both praised the excellent summit.".to_string(),
    );
    texts.insert("Gemini".to_string(), "No comment.".to_string());

    let text = render_comparison(&analyzer.evaluator().compare_models(&texts));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "DeepSeek:");
    assert!(lines[1].starts_with("  china: 👍 bias_score="));
    assert!(lines[1].ends_with(", stance=positive"));
    assert!(lines[2].starts_with("  russia: 👍 bias_score="));
    assert_eq!(lines[3], "Gemini:");
    assert_eq!(lines[4], "  no tracked entities mentioned");
    assert_eq!(lines.len(), 5);
}
