//! JSON persistence for analysis results and collected responses.
//!
//! Files are pretty-printed UTF-8 JSON; non-ASCII text is written as-is.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;
use crate::types::{ComprehensiveResult, ModelResponses};

/// Save a comprehensive result as `model -> entity -> verdict` JSON.
pub fn save_results(path: impl AsRef<Path>, result: &ComprehensiveResult) -> Result<()> {
    write_json(path.as_ref(), result)
}

pub fn load_results(path: impl AsRef<Path>) -> Result<ComprehensiveResult> {
    read_json(path.as_ref())
}

/// Save collected responses as `model -> question_id -> text` JSON.
pub fn save_responses(path: impl AsRef<Path>, responses: &ModelResponses) -> Result<()> {
    write_json(path.as_ref(), responses)
}

pub fn load_responses(path: impl AsRef<Path>) -> Result<ModelResponses> {
    read_json(path.as_ref())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    debug!(path = %path.display(), "saved");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    debug!(path = %path.display(), "loaded");
    Ok(value)
}
