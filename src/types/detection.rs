//! Entity detection types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a recognized or matched span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    /// Geo-political entity: country, city, state.
    #[serde(rename = "GPE")]
    Gpe,
    #[serde(rename = "PERSON")]
    Person,
    #[serde(rename = "ORG")]
    Org,
    /// Raw alias match from the substring fallback.
    #[serde(rename = "KEYWORD")]
    Keyword,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Gpe => "GPE",
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Keyword => "KEYWORD",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled span of text. Offsets are character (not byte) positions,
/// end-exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }
}

/// Which strategy produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Recognizer,
    Substring,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Recognizer => "recognizer",
            DetectionMethod::Substring => "substring",
        }
    }
}

/// Outcome of looking for one entity in one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub found: bool,
    /// Strategy that found the entity; `None` when not found.
    pub method: Option<DetectionMethod>,
    /// Spans that matched an alias of the entity.
    pub matched_spans: Vec<EntitySpan>,
    /// Every GPE/PERSON/ORG span the recognizer produced, matching or not.
    /// Empty when the recognizer is not loaded.
    pub recognized: Vec<EntitySpan>,
}

impl DetectionResult {
    pub fn not_found() -> Self {
        Self {
            found: false,
            method: None,
            matched_spans: Vec::new(),
            recognized: Vec::new(),
        }
    }
}
