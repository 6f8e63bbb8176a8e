//! Extraction of fenced JSON documents from raw model replies.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```json([\s\S]*?)```").expect("fence pattern is valid")
});

/// Errors raised while pulling a JSON document out of a model reply.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    /// The reply contained no ```json fenced block.
    #[error("response contained no fenced JSON block")]
    NotFenced,
    /// The fenced block was not parseable JSON.
    #[error("fenced block is not valid JSON: {0}")]
    MalformedJson(String),
    /// The parsed document lacked one or more required fields.
    #[error("parsed JSON is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Finds the first ```json fenced block in `raw`, parses it, and checks
/// that every name in `required_fields` is present with a usable value.
///
/// A field counts as missing when it is absent, `null`, or a string that
/// is empty after trimming. Arrays, objects, numbers, and booleans always
/// count as present. The parsed document is returned unchanged.
pub fn extract_json(raw: &str, required_fields: &[&str]) -> Result<Value, ExtractError> {
    let captures = JSON_FENCE.captures(raw).ok_or(ExtractError::NotFenced)?;
    let body = captures
        .get(1)
        .map(|m| m.as_str().trim())
        .ok_or(ExtractError::NotFenced)?;

    let value: Value =
        serde_json::from_str(body).map_err(|e| ExtractError::MalformedJson(e.to_string()))?;

    let missing: Vec<String> = required_fields
        .iter()
        .filter(|field| !is_present(value.get(**field)))
        .map(|field| (*field).to_owned())
        .collect();

    if missing.is_empty() {
        Ok(value)
    } else {
        Err(ExtractError::MissingFields(missing))
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
