use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use forseti::{
    ConfidenceDenominator, EntityCatalog, Forseti, ModelResponses, MultiQuestionAnalyzer,
    QuestionAssociation, QuestionBattery, QuestionResponses, SentimentModel, SentimentScore,
    Stance, StanceDistribution,
};

/// Scorer that returns a scripted compound per exact text, 0 otherwise.
struct ScriptedScorer {
    scores: HashMap<&'static str, f64>,
}

impl ScriptedScorer {
    fn new(scores: &[(&'static str, f64)]) -> Arc<Self> {
        Arc::new(Self {
            scores: scores.iter().copied().collect(),
        })
    }
}

impl SentimentModel for ScriptedScorer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn score(&self, text: &str) -> SentimentScore {
        SentimentScore {
            compound: self.scores.get(text).copied().unwrap_or(0.0),
            ..SentimentScore::neutral()
        }
    }
}

const CHINA_GOOD: &str = "China is doing well.";
const CHINA_FLAT: &str = "China exists.";
const CHINA_BAD: &str = "China is doing badly.";
const NOTHING: &str = "I would rather not say.";

fn scripted() -> Arc<ScriptedScorer> {
    ScriptedScorer::new(&[
        (CHINA_GOOD, 0.6),
        (CHINA_BAD, -0.65),
        ("China rising.", 0.5),
        ("China slipping.", -0.5),
    ])
}

fn analyzer() -> MultiQuestionAnalyzer {
    Forseti::builder()
        .substring_only()
        .scorer(scripted())
        .build()
        .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn mixed_stances_tie_to_neutral() {
    let analyzer = analyzer();
    // Weights 1.0 and 1.3: weighted scores are [0.5, -0.65].
    let verdict = analyzer.aggregate(
        [("china_economy", "China rising."), ("russia_ukraine", "China slipping.")],
        "china",
    );

    assert!(verdict.target_found);
    assert!(approx(verdict.overall_bias_score, -0.075));
    assert_eq!(verdict.overall_stance, Stance::Neutral);
    assert_eq!(verdict.response_count, Some(2));
    assert_eq!(
        verdict.stance_distribution,
        Some(StanceDistribution {
            positive: 1,
            negative: 1,
            neutral: 0,
        })
    );
    assert!(approx(verdict.confidence, 2.0 / 13.0));
}

#[test]
fn weights_scale_individual_scores() {
    let analyzer = analyzer();
    let verdict = analyzer.aggregate(
        [("china_politics", CHINA_GOOD), ("china_tech", CHINA_BAD)],
        "china",
    );

    let scores = verdict.individual_scores.unwrap();
    assert!(approx(scores[0], 0.6 * 1.2));
    assert!(approx(scores[1], -0.65 * 0.8));
}

#[test]
fn confidence_counts_against_whole_battery() {
    let analyzer = analyzer();
    let verdict = analyzer.aggregate(
        [
            ("china_politics", CHINA_GOOD),
            ("china_economy", CHINA_FLAT),
            ("china_tech", CHINA_BAD),
        ],
        "china",
    );
    assert_eq!(verdict.response_count, Some(3));
    assert!(approx(verdict.confidence, 3.0 / 13.0));
    assert!((verdict.confidence - 0.2308).abs() < 1e-4);
}

#[test]
fn responses_without_entity_are_excluded() {
    let analyzer = analyzer();
    let verdict = analyzer.aggregate(
        [("china_politics", CHINA_GOOD), ("china_economy", NOTHING)],
        "china",
    );
    assert_eq!(verdict.response_count, Some(1));
    assert!(approx(verdict.confidence, 1.0 / 13.0));
}

#[test]
fn unknown_question_ids_are_skipped() {
    let analyzer = analyzer();
    let verdict = analyzer.aggregate([("china_weather", CHINA_GOOD)], "china");
    assert!(!verdict.target_found);
    assert_eq!(verdict.response_count, None);
    assert_eq!(verdict.confidence, 0.0);
}

#[test]
fn no_usable_responses_is_insufficient() {
    let analyzer = analyzer();
    let empty: [(&str, &str); 0] = [];
    assert!(!analyzer.aggregate(empty, "china").target_found);

    let verdict = analyzer.aggregate([("china_economy", ""), ("china_tech", NOTHING)], "china");
    assert!(!verdict.target_found);
    assert_eq!(verdict.overall_bias_score, 0.0);
    assert_eq!(verdict.overall_stance, Stance::Neutral);
    assert!(verdict.stance_distribution.is_none());
    assert!(verdict.individual_scores.is_none());
}

#[test]
fn majority_ignores_neutral_count() {
    let analyzer = analyzer();
    let verdict = analyzer.aggregate(
        [
            ("china_politics", CHINA_GOOD),
            ("china_economy", CHINA_FLAT),
            ("china_tech", CHINA_FLAT),
        ],
        "china",
    );
    assert_eq!(verdict.overall_stance, Stance::Positive);
    let dist = verdict.stance_distribution.unwrap();
    assert_eq!(dist.neutral, 2);
    assert_eq!(dist.total(), 3);
}

#[test]
fn analyze_all_aggregates_each_entity_over_its_questions() {
    let analyzer = analyzer();

    let mut answers = QuestionResponses::new();
    answers.insert("china_politics".into(), CHINA_GOOD.into());
    answers.insert("china_economy".into(), CHINA_FLAT.into());
    answers.insert("usa_democracy".into(), NOTHING.into());
    // Mentions China but belongs to a Russia question, so china never sees it.
    answers.insert("russia_politics".into(), CHINA_BAD.into());

    let mut responses = ModelResponses::new();
    responses.insert("model-a".into(), answers);

    let result = analyzer.analyze_all(&responses);
    assert_eq!(result.len(), 1);

    let china = result.get("model-a", "china").unwrap();
    assert!(china.target_found);
    assert!(approx(china.overall_bias_score, 0.36));
    assert_eq!(china.overall_stance, Stance::Positive);
    assert_eq!(china.response_count, Some(2));
    assert!(approx(china.confidence, 2.0 / 13.0));

    assert!(!result.get("model-a", "usa").unwrap().target_found);
    assert!(!result.get("model-a", "russia").unwrap().target_found);
    assert!(!result.get("model-a", "north_korea").unwrap().target_found);
}

#[test]
fn analyze_all_lists_every_catalog_entity_per_model() {
    let analyzer = analyzer();
    let mut responses = ModelResponses::new();
    responses.insert("empty-model".into(), QuestionResponses::new());
    responses.insert("other-model".into(), QuestionResponses::new());

    let result = analyzer.analyze_all(&responses);
    let models: Vec<&str> = result.models().collect();
    assert_eq!(models, ["empty-model", "other-model"]);
    for model in models {
        assert_eq!(result.model(model).unwrap().len(), 4);
    }
}

#[test]
fn entity_subset_confidence() {
    let analyzer = Forseti::builder()
        .substring_only()
        .scorer(scripted())
        .confidence(ConfidenceDenominator::EntitySubset)
        .build()
        .unwrap();

    let verdict = analyzer.aggregate([("china_politics", CHINA_GOOD)], "china");
    assert!(approx(verdict.confidence, 0.25));
}

#[test]
fn explicit_association_uses_question_targets() {
    let battery = QuestionBattery::new()
        .with_targeted_question("q1", "Talk about East Asia.", 1.0, ["china", "north_korea"])
        .with_targeted_question("q2", "Talk about Europe.", 2.0, ["russia"]);
    let catalog = EntityCatalog::new()
        .with_entity("china", ["China"])
        .with_entity("north_korea", ["North Korea"])
        .with_entity("russia", ["Russia"]);

    let analyzer = Forseti::builder()
        .substring_only()
        .scorer(scripted())
        .catalog(catalog)
        .battery(battery)
        .association(QuestionAssociation::Explicit)
        .build()
        .unwrap();

    let ids: Vec<&str> = analyzer
        .question_set(Some("north_korea"))
        .into_iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(ids, ["q1"]);

    let mut answers = BTreeMap::new();
    answers.insert("q1".to_string(), CHINA_GOOD.to_string());
    answers.insert("q2".to_string(), CHINA_BAD.to_string());
    let mut responses = ModelResponses::new();
    responses.insert("m".to_string(), answers);

    let result = analyzer.analyze_all(&responses);
    let china = result.get("m", "china").unwrap();
    assert_eq!(china.response_count, Some(1));
    assert!(approx(china.overall_bias_score, 0.6));
    assert!(approx(china.confidence, 0.5));
    assert!(!result.get("m", "russia").unwrap().target_found);
}

#[test]
fn confidence_never_exceeds_one() {
    let battery = QuestionBattery::new().with_question("china_only", "Discuss China.", 1.0);
    let analyzer = Forseti::builder()
        .substring_only()
        .scorer(scripted())
        .battery(battery)
        .build()
        .unwrap();

    // The same question answered twice still counts as two responses.
    let verdict = analyzer.aggregate(
        [("china_only", CHINA_GOOD), ("china_only", CHINA_GOOD)],
        "china",
    );
    assert_eq!(verdict.response_count, Some(2));
    assert_eq!(verdict.confidence, 1.0);
}
