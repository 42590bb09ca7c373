//! Heuristic named-entity recognizer.
//!
//! Finds runs of capitalized words (joined by "of"/"the"), then labels each
//! run from a small political gazetteer, leading titles, organization
//! suffixes, acronyms and location prepositions. Runs that match none of
//! these are dropped rather than guessed.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{EntityLabel, EntitySpan};

use super::recognizer::{EntityRecognizer, RecognizerLoader};

const SENTENCE_STARTERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "he", "she", "we", "they", "in",
    "on", "at", "to", "for", "from", "by", "with", "and", "but", "or", "so", "yet", "if",
    "because", "however", "while", "although", "overall", "today", "now", "then", "what",
    "where", "when", "who", "why", "how", "is", "are", "was", "were", "has", "have", "had",
    "its", "their", "his", "her", "our", "many", "some", "both", "as", "i",
];

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "president", "premier", "chairman", "leader", "minister",
    "secretary", "general", "senator", "governor", "king", "queen", "prince", "supreme",
    "prime", "foreign", "chancellor",
];

const ORG_WORDS: &[&str] = &[
    "party", "government", "ministry", "committee", "council", "army", "navy", "agency",
    "university", "institute", "bank", "union", "organization", "organisation", "congress",
    "parliament", "assembly", "senate", "court", "department", "commission", "corporation",
    "inc", "corp", "ltd", "foundation", "forces", "guard", "bureau", "administration",
];

const LOC_PREPOSITIONS: &[&str] = &[
    "in", "from", "at", "to", "near", "across", "throughout", "within", "toward", "towards",
];

const KNOWN_GPES: &[&str] = &[
    "china", "peoples republic of china", "prc", "beijing", "shanghai", "taiwan", "hong kong",
    "xinjiang", "tibet", "north korea", "south korea", "korea", "dprk", "pyongyang", "seoul",
    "united states", "united states of america", "usa", "us", "america", "washington",
    "russia", "russian federation", "moscow", "ukraine", "kyiv", "crimea", "europe", "japan",
    "tokyo", "india", "iran", "iraq", "afghanistan", "syria", "israel", "germany", "france",
    "united kingdom", "uk", "britain", "canada", "mexico", "brazil", "vietnam", "soviet union",
    "ussr", "asia", "africa", "middle east",
];

const KNOWN_PERSONS: &[&str] = &[
    "xi jinping", "xi", "kim jong-un", "kim jong un", "kim il-sung", "kim jong-il",
    "vladimir putin", "putin", "joe biden", "biden", "donald trump", "trump", "barack obama",
    "obama", "mao zedong", "mao", "deng xiaoping", "stalin", "lenin", "volodymyr zelensky",
    "zelensky", "lavrov", "gorbachev", "yeltsin", "kamala harris", "moon jae-in", "hu jintao",
    "li keqiang",
];

const KNOWN_ORGS: &[&str] = &[
    "ccp", "cpc", "chinese communist party", "communist party", "communist party of china",
    "pla", "peoples liberation army", "nato", "un", "united nations", "eu", "european union",
    "kremlin", "white house", "pentagon", "fbi", "cia", "nsa", "kgb", "fsb", "wto", "imf",
    "world bank", "asean", "brics", "huawei", "gazprom", "workers party of korea",
];

/// Rule-based recognizer with a built-in gazetteer. Construction is free.
#[derive(Debug, Clone, Default)]
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Loader that always succeeds with a heuristic recognizer.
    pub fn loader() -> RecognizerLoader {
        Arc::new(|| -> Result<Arc<dyn EntityRecognizer>> {
            Ok(Arc::new(HeuristicRecognizer::new()))
        })
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();

        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            if !token.capitalized() || SENTENCE_STARTERS.contains(&token.key().as_str()) {
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < tokens.len() && !tokens[end - 1].breaks_after {
                if tokens[end].capitalized() {
                    end += 1;
                } else if tokens[end].is_connector()
                    && !tokens[end].breaks_after
                    && tokens.get(end + 1).is_some_and(Token::capitalized)
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let prev = i.checked_sub(1).map(|p| tokens[p].key());
            if let Some(span) = classify(text, &tokens[i..end], prev.as_deref()) {
                spans.push(span);
            }
            i = end;
        }

        spans
    }
}

fn classify(text: &str, run: &[Token<'_>], prev: Option<&str>) -> Option<EntitySpan> {
    let mut run = run;
    let mut titled = prev.is_some_and(|p| TITLES.contains(&p));
    while run.len() > 1 && TITLES.contains(&run[0].key().as_str()) {
        run = &run[1..];
        titled = true;
    }
    while run.len() > 1 && run[0].is_connector() {
        run = &run[1..];
        titled = false;
    }
    let (first, last) = (run.first()?, run.last()?);

    let key = run.iter().map(Token::key).collect::<Vec<_>>().join(" ");
    let label = if KNOWN_PERSONS.contains(&key.as_str()) {
        EntityLabel::Person
    } else if KNOWN_GPES.contains(&key.as_str()) {
        EntityLabel::Gpe
    } else if KNOWN_ORGS.contains(&key.as_str()) {
        EntityLabel::Org
    } else if titled {
        EntityLabel::Person
    } else if run.iter().any(|t| ORG_WORDS.contains(&t.key().as_str())) {
        EntityLabel::Org
    } else if run.len() == 1 && first.is_acronym() {
        EntityLabel::Org
    } else if prev.is_some_and(|p| LOC_PREPOSITIONS.contains(&p)) {
        EntityLabel::Gpe
    } else {
        return None;
    };

    Some(EntitySpan::new(
        &text[first.byte_start..last.byte_end],
        label,
        first.start,
        last.end,
    ))
}

/// A whitespace-delimited word with surrounding punctuation and any
/// possessive suffix removed.
struct Token<'a> {
    clean: &'a str,
    start: usize,
    end: usize,
    byte_start: usize,
    byte_end: usize,
    /// Trailing punctuation ends any capitalized run at this token.
    breaks_after: bool,
}

impl Token<'_> {
    fn capitalized(&self) -> bool {
        self.clean.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_connector(&self) -> bool {
        matches!(self.key().as_str(), "of" | "the")
    }

    fn is_acronym(&self) -> bool {
        let letters = self.clean.chars().filter(|c| c.is_alphabetic()).count();
        letters >= 2 && self.clean.chars().all(|c| c.is_uppercase() || c == '.')
    }

    /// Lowercase form with dots and apostrophes dropped, for gazetteer lookups.
    fn key(&self) -> String {
        self.clean
            .chars()
            .filter(|c| !matches!(c, '.' | '\'' | '’'))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word: Option<(usize, usize)> = None;
    let mut char_pos = 0;

    for (byte, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some((byte_start, char_start)) = word.take() {
                push_token(&mut tokens, text, byte_start, byte, char_start);
            }
        } else if word.is_none() {
            word = Some((byte, char_pos));
        }
        char_pos += 1;
    }
    if let Some((byte_start, char_start)) = word {
        push_token(&mut tokens, text, byte_start, text.len(), char_start);
    }

    tokens
}

fn push_token<'a>(
    tokens: &mut Vec<Token<'a>>,
    text: &'a str,
    byte_start: usize,
    byte_end: usize,
    char_start: usize,
) {
    let raw = &text[byte_start..byte_end];
    let breaks_after = raw.ends_with(['.', '!', '?', ',', ';', ':', ')', ']', '"', '”']);

    let lead = raw.len() - raw.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let trimmed = raw[lead..].trim_end_matches(|c: char| !c.is_alphanumeric());
    let clean = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("’s"))
        .unwrap_or(trimmed);

    if clean.is_empty() {
        if let Some(last) = tokens.last_mut() {
            last.breaks_after = true;
        }
        return;
    }

    let start = char_start + raw[..lead].chars().count();
    tokens.push(Token {
        clean,
        start,
        end: start + clean.chars().count(),
        byte_start: byte_start + lead,
        byte_end: byte_start + lead + clean.len(),
        breaks_after,
    });
}
