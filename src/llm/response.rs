use serde_json::Value;

use crate::models::FeedbackRecord;

use super::prompts::REQUIRED_FIELDS;
use super::validation::{normalize_feedback, FeedbackError};

/// Remove a Markdown code fence wrapped around a model response.
///
/// Strips a leading ```` ``` ```` (with an optional language tag such as
/// `json`) and a trailing ```` ``` ````, then trims whitespace. Text without
/// fences is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = rest[tag_len..].trim_start();
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest.trim_end();
    }

    body.trim()
}

/// Turn raw model text into a feedback record.
///
/// Strips fences, parses a JSON object, requires every contract field, and
/// normalizes the values.
pub fn parse_feedback_response(text: &str) -> Result<FeedbackRecord, FeedbackError> {
    let body = strip_code_fences(text);
    let raw: Value = serde_json::from_str(body)?;
    let object = raw.as_object().ok_or(FeedbackError::NotAnObject)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FeedbackError::MissingFields(missing));
    }

    normalize_feedback(&raw)
}
