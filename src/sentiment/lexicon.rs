//! Valence lexicon for rule-based sentiment scoring.
//!
//! Maps lowercase words to valence ratings in `[-4, 4]`, alongside the
//! booster and negation word lists the valence rules consult.

use std::collections::HashMap;

/// Valence added by an intensifying booster word.
pub(crate) const BOOST_INCREMENT: f64 = 0.293;
/// Valence added by a dampening booster word.
pub(crate) const BOOST_DECREMENT: f64 = -0.293;

/// A word-to-valence lexicon. Lookups are case-insensitive.
///
/// ```rust
/// use forseti::sentiment::ValenceLexicon;
///
/// let mut lexicon = ValenceLexicon::default();
/// lexicon.insert("belligerent", -2.4);
/// assert_eq!(lexicon.get("Belligerent"), Some(-2.4));
/// ```
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    words: HashMap<String, f64>,
}

impl ValenceLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Insert or overwrite a word. Valence is clamped to `[-4, 4]`.
    pub fn insert(&mut self, word: &str, valence: f64) {
        self.words
            .insert(word.to_lowercase(), valence.clamp(-4.0, 4.0));
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Merge another lexicon into this one; its values win.
    pub fn merge(&mut self, other: &ValenceLexicon) {
        for (word, valence) in &other.words {
            self.words.insert(word.clone(), *valence);
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        let mut lexicon = Self::new();
        for (word, valence) in VALENCES {
            lexicon.insert(word, *valence);
        }
        lexicon
    }
}

/// Booster valence for a lowercase word, if it is a booster.
pub(crate) fn booster(word: &str) -> Option<f64> {
    if INCREMENT_BOOSTERS.contains(&word) {
        Some(BOOST_INCREMENT)
    } else if DECREMENT_BOOSTERS.contains(&word) {
        Some(BOOST_DECREMENT)
    } else {
        None
    }
}

/// Whether a lowercase word negates what follows it.
pub(crate) fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

const INCREMENT_BOOSTERS: &[&str] = &[
    "absolutely",
    "amazingly",
    "awfully",
    "completely",
    "considerable",
    "considerably",
    "decidedly",
    "deeply",
    "enormous",
    "enormously",
    "entirely",
    "especially",
    "exceptional",
    "exceptionally",
    "extreme",
    "extremely",
    "fabulously",
    "fully",
    "greatly",
    "highly",
    "hugely",
    "incredible",
    "incredibly",
    "intensely",
    "major",
    "majorly",
    "more",
    "most",
    "particularly",
    "purely",
    "quite",
    "really",
    "remarkably",
    "so",
    "substantially",
    "thoroughly",
    "total",
    "totally",
    "tremendous",
    "tremendously",
    "unbelievably",
    "unusually",
    "utter",
    "utterly",
    "very",
];

const DECREMENT_BOOSTERS: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "kinda",
    "less",
    "little",
    "marginal",
    "marginally",
    "occasional",
    "occasionally",
    "partly",
    "scarce",
    "scarcely",
    "slight",
    "slightly",
    "somewhat",
    "sorta",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

#[rustfmt::skip]
const VALENCES: &[(&str, f64)] = &[
    // Strongly positive
    ("excellent", 2.7), ("outstanding", 3.0), ("wonderful", 2.7), ("amazing", 2.8),
    ("fantastic", 2.6), ("brilliant", 2.8), ("superb", 3.1), ("magnificent", 3.4),
    ("exceptional", 2.6), ("perfect", 2.7), ("love", 3.2), ("loves", 2.7), ("beloved", 2.3),
    ("triumph", 3.0), ("heroic", 2.6), ("inspiring", 2.6), ("inspired", 2.2),
    ("freedom", 3.2), ("liberty", 2.4), ("peace", 2.5), ("peaceful", 2.2), ("prosperity", 2.5),
    ("prosperous", 2.1), ("great", 3.1), ("best", 3.2), ("beacon", 2.0),
    // Moderately positive
    ("good", 1.9), ("nice", 1.8), ("positive", 2.3), ("impressive", 2.3), ("remarkable", 2.2),
    ("notable", 1.4), ("admirable", 2.4), ("achievement", 2.1), ("achievements", 1.8),
    ("achieved", 1.8), ("success", 2.7), ("successful", 2.8), ("successes", 2.6),
    ("progress", 1.8), ("improve", 1.9), ("improved", 2.1), ("improvement", 2.0),
    ("improvements", 1.8), ("benefit", 2.0), ("benefits", 1.6), ("beneficial", 1.9),
    ("growth", 1.6), ("innovation", 1.8), ("innovative", 1.9), ("advance", 1.3),
    ("advances", 1.3), ("advanced", 1.2), ("advancement", 1.4), ("strong", 2.3),
    ("strength", 2.2), ("strengths", 1.9), ("robust", 1.6), ("resilience", 1.9),
    ("resilient", 1.8), ("stable", 1.2), ("stability", 1.6), ("secure", 1.4),
    ("security", 1.4), ("safe", 1.9), ("protect", 1.6), ("protected", 1.9),
    ("protection", 1.3), ("protections", 1.2), ("cooperation", 1.4), ("cooperative", 1.5),
    ("collaboration", 1.4), ("partnership", 1.5), ("support", 1.7), ("supports", 1.5),
    ("helpful", 1.9), ("help", 1.7), ("hope", 1.9), ("hopeful", 2.3), ("optimistic", 1.8),
    ("opportunity", 1.8), ("opportunities", 1.7), ("welfare", 1.4), ("respect", 2.1),
    ("respected", 2.0), ("honest", 2.3), ("fair", 1.3), ("justice", 2.0), ("trust", 2.3),
    ("trusted", 2.1), ("lifted", 1.2), ("welcome", 2.0), ("praise", 2.6), ("praised", 2.2),
    ("celebrated", 2.7), ("celebrate", 2.7), ("confident", 2.2), ("confidence", 2.3),
    ("effective", 2.0), ("efficient", 1.8), ("important", 0.8), ("rich", 2.6),
    ("wealth", 2.2), ("wealthy", 1.5), ("healthy", 1.7), ("constitutional", 0.8),
    ("democratic", 1.2), ("democracy", 1.4), ("transparent", 1.3), ("transparency", 1.2),
    ("accountable", 1.0), ("accountability", 1.0), ("legitimate", 0.9), ("sovereignty", 0.6),
    ("right", 0.8), ("rights", 1.0), ("inclusive", 1.4), ("vibrant", 2.0), ("thriving", 2.0),
    ("commendable", 1.9), ("reasonable", 1.2), ("pragmatic", 0.9), ("constructive", 1.4),
    ("value", 1.4), ("values", 1.2), ("like", 1.5), ("agree", 1.5),
    ("agreement", 1.8), ("agreements", 1.4), ("win", 2.8), ("winning", 2.4),
    ("interesting", 1.7), ("pleased", 1.9), ("glad", 2.0), ("happy", 2.7), ("proud", 2.1),
    // Mildly negative
    ("concern", -1.0), ("concerns", -1.2), ("concerned", -1.0), ("concerning", -1.3),
    ("problem", -1.7), ("problems", -1.7), ("problematic", -1.9), ("challenge", -0.3),
    ("challenges", -0.4), ("challenged", -0.4), ("risk", -1.1), ("risks", -1.1),
    ("risky", -1.4), ("debt", -1.5), ("limited", -0.7), ("lacks", -1.3), ("lack", -1.3),
    ("lacking", -1.2), ("questions", -0.2), ("tension", -1.3), ("tensions", -1.3),
    ("tense", -1.4), ("assertive", -0.2), ("mixed", -0.3), ("difficult", -1.5),
    ("uncertain", -1.2), ("uncertainty", -1.4), ("criticism", -1.9), ("criticized", -1.6),
    ("critical", -1.1), ("controversial", -0.8), ("polarization", -1.4),
    ("polarized", -1.2), ("divisions", -1.2), ("divided", -1.2), ("division", -0.9),
    ("restrictions", -1.2), ("restrict", -1.6), ("restricted", -1.6), ("restrictive", -1.5),
    ("sanctions", -1.2), ("dispute", -1.7), ("disputes", -1.4), ("disputed", -1.4),
    ("interventionist", -1.0), ("intervention", -0.6), ("interventions", -0.6),
    ("counterproductive", -1.6), ("instability", -1.8), ("unstable", -1.5),
    ("isolated", -1.3), ("isolation", -1.5), ("poverty", -2.3), ("poor", -2.1),
    ("weak", -1.9), ("weakness", -1.6), ("decline", -1.5), ("declining", -1.3),
    ("fail", -2.5), ("failed", -2.3), ("failure", -2.3), ("failures", -2.0),
    ("unfair", -2.1), ("bias", -0.4), ("biased", -1.1), ("censorship", -2.0),
    ("censor", -1.6), ("surveillance", -1.2), ("propaganda", -1.8), ("corruption", -2.7),
    ("corrupt", -3.0), ("dissent", -0.8), ("strict", -0.6), ("confrontational", -1.7),
    ("confrontation", -1.3), ("hostile", -2.2), ("hostility", -2.3), ("worry", -1.9),
    ("worries", -1.8), ("worrying", -1.4), ("doubt", -1.5), ("doubts", -1.2),
    ("unfortunately", -1.7), ("unfortunate", -2.0), ("damage", -2.2), ("damaged", -1.9),
    // Strongly negative
    ("bad", -2.5), ("terrible", -2.1), ("horrible", -2.5), ("awful", -2.0),
    ("worst", -3.1), ("worse", -2.1), ("hate", -2.7), ("hatred", -3.2), ("evil", -3.4),
    ("brutal", -3.1), ("brutality", -3.1), ("cruel", -2.8), ("cruelty", -2.9),
    ("authoritarian", -1.9), ("authoritarianism", -2.0), ("dictator", -2.3),
    ("dictatorship", -2.4), ("tyranny", -2.9), ("totalitarian", -2.3), ("regime", -1.0),
    ("repressive", -2.4), ("repression", -2.4), ("oppress", -2.6), ("oppresses", -2.5),
    ("oppressed", -2.1), ("oppression", -2.8), ("oppressive", -2.6), ("suppress", -1.4),
    ("suppresses", -1.4), ("suppressed", -1.5), ("suppression", -1.5),
    ("abuse", -3.2), ("abuses", -3.0), ("abused", -2.3), ("violation", -2.2),
    ("violations", -2.4), ("violate", -2.2), ("violates", -2.3), ("violated", -2.4),
    ("violence", -3.1), ("violent", -2.9), ("threat", -2.4), ("threats", -1.8),
    ("threaten", -2.0), ("threatens", -2.0), ("threatening", -2.2), ("danger", -2.4),
    ("dangerous", -2.1), ("aggression", -2.4), ("aggressive", -0.6), ("invasion", -2.2),
    ("invade", -2.2), ("invaded", -2.1), ("war", -2.9), ("wars", -2.6), ("conflict", -1.3),
    ("conflicts", -1.3), ("crisis", -3.1), ("destruction", -2.7), ("destroyed", -3.2),
    ("destroy", -2.5), ("destabilized", -1.9), ("destabilize", -1.8),
    ("destabilizing", -1.9), ("suffering", -2.1), ("suffer", -2.5), ("death", -2.9),
    ("deaths", -2.7), ("kill", -3.7), ("killed", -3.5), ("killing", -3.4), ("terror", -3.0),
    ("terrorism", -3.6), ("atrocities", -3.0), ("genocide", -3.5),
    ("persecution", -2.7), ("imprisonment", -2.2), ("torture", -3.5), ("fear", -2.2),
    ("fears", -1.8), ("afraid", -2.2), ("angry", -2.3), ("anger", -2.7), ("illegal", -2.6),
    ("unlawful", -2.2), ("aggressor", -2.2), ("imperialism", -1.6), ("imperialist", -1.7),
    ("exploitation", -2.1), ("exploit", -1.4), ("harm", -2.5), ("harmful", -2.6),
    ("catastrophic", -3.1), ("disaster", -3.1), ("severe", -1.6), ("serious", -0.3),
    ("humanitarian", 0.6), ("condemn", -2.2), ("condemned", -2.5), ("sad", -2.1),
    ("tragic", -3.1), ("tragedy", -3.4), ("lie", -1.6), ("lies", -1.8), ("lying", -2.4),
    ("manipulation", -1.8), ("manipulative", -2.2), ("reckless", -1.7), ("rogue", -1.4),
];
