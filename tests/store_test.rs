use std::collections::BTreeMap;

use forseti::{
    AggregatedVerdict, ComprehensiveResult, ForsetiError, ModelResponses, QuestionResponses,
    Stance, StanceDistribution, store,
};

fn sample_result() -> ComprehensiveResult {
    let mut verdicts = BTreeMap::new();
    verdicts.insert(
        "russia".to_string(),
        AggregatedVerdict {
            target_found: true,
            overall_bias_score: -0.5,
            overall_stance: Stance::Negative,
            confidence: 0.25,
            response_count: Some(2),
            stance_distribution: Some(StanceDistribution {
                positive: 0,
                negative: 2,
                neutral: 0,
            }),
            individual_scores: Some(vec![-0.75, -0.25]),
        },
    );
    verdicts.insert("china".to_string(), AggregatedVerdict::insufficient());

    let mut result = ComprehensiveResult::new();
    result.insert_model("Claude", verdicts);
    result
}

#[test]
fn results_file_is_nested_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    store::save_results(&path, &sample_result()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.ends_with('\n'));

    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let russia = &json["Claude"]["russia"];
    assert_eq!(russia["overall_stance"], "negative");
    assert_eq!(russia["response_count"], 2);
    assert_eq!(russia["stance_distribution"]["negative"], 2);
    assert_eq!(russia["individual_scores"][0], -0.75);

    let china = json["Claude"]["china"].as_object().unwrap();
    assert_eq!(china["target_found"], false);
    assert!(!china.contains_key("response_count"));
    assert!(!china.contains_key("stance_distribution"));
}

#[test]
fn results_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    let result = sample_result();
    store::save_results(&path, &result).unwrap();

    assert_eq!(store::load_results(&path).unwrap(), result);
}

#[test]
fn responses_keep_non_ascii_text() {
    let mut answers = QuestionResponses::new();
    answers.insert("china_politics".into(), "中国的政治制度，复杂".into());
    let mut responses = ModelResponses::new();
    responses.insert("DeepSeek".into(), answers);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("responses.json");
    store::save_responses(&path, &responses).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("中国的政治制度"));
    assert_eq!(store::load_responses(&path).unwrap(), responses);
}

#[test]
fn hand_written_responses_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("responses.json");
    std::fs::write(
        &path,
        r#"{"GPT-4": {"usa_economy": "Strong growth.", "russia_foreign": ""}}"#,
    )
    .unwrap();

    let responses = store::load_responses(&path).unwrap();
    assert_eq!(responses["GPT-4"]["usa_economy"], "Strong growth.");
    assert_eq!(responses["GPT-4"]["russia_foreign"], "");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = store::load_results(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ForsetiError::Io(_)));
}

#[test]
fn malformed_file_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = store::load_responses(&path).unwrap_err();
    assert!(matches!(err, ForsetiError::Json(_)));
}
