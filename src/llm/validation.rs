use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::FeedbackRecord;

use super::client::LlmError;

/// Valid range for the four dimension scores
pub const DIMENSION_SCORE_RANGE: (i64, i64) = (0, 100);
/// Valid range for the overall score
pub const OVERALL_SCORE_RANGE: (f64, f64) = (0.0, 10.0);

/// Why an LLM response could not become a feedback record
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("failed to parse LLM response as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("LLM response is not a JSON object")]
    NotAnObject,
    #[error("missing required fields in LLM response: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

impl FeedbackError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FeedbackError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Normalize a raw LLM mapping into a typed, range-checked feedback record.
///
/// Scores may be numbers or numeric strings; fractional values truncate
/// toward zero. Every score is clamped into its documented range, so no raw
/// model value is ever surfaced unchecked.
pub fn normalize_feedback(raw: &Value) -> Result<FeedbackRecord, FeedbackError> {
    let object = raw.as_object().ok_or(FeedbackError::NotAnObject)?;
    let field = |name: &str| {
        object
            .get(name)
            .ok_or_else(|| FeedbackError::MissingFields(vec![name.to_string()]))
    };

    Ok(FeedbackRecord {
        summary: coerce_text(field("summary")?, "summary")?,
        clarity_score: clamp_dimension(coerce_integer(field("clarityScore")?, "clarityScore")?),
        confidence_score: clamp_dimension(coerce_integer(
            field("confidenceScore")?,
            "confidenceScore",
        )?),
        engagement_score: clamp_dimension(coerce_integer(
            field("engagementScore")?,
            "engagementScore",
        )?),
        structure_score: clamp_dimension(coerce_integer(
            field("structureScore")?,
            "structureScore",
        )?),
        overall_score: clamp_overall(coerce_real(field("overall_score")?, "overall_score")?),
        constructive_tip: coerce_text(field("tip")?, "tip")?,
        strengths: coerce_text_list(field("strengths")?, "strengths")?,
        improvements: coerce_text_list(field("improvements")?, "improvements")?,
    })
}

/// Clamp an integer score into 0-100
pub fn clamp_dimension(score: i64) -> u8 {
    score.clamp(DIMENSION_SCORE_RANGE.0, DIMENSION_SCORE_RANGE.1) as u8
}

/// Clamp a real score into 0.0-10.0
pub fn clamp_overall(score: f64) -> f64 {
    score.clamp(OVERALL_SCORE_RANGE.0, OVERALL_SCORE_RANGE.1)
}

fn coerce_integer(value: &Value, field: &str) -> Result<i64, FeedbackError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(u) = n.as_u64() {
                Ok(i64::try_from(u).unwrap_or(i64::MAX))
            } else {
                truncate_real(n.as_f64().unwrap_or(f64::NAN), field)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(i);
            }
            match s.parse::<f64>() {
                Ok(f) => truncate_real(f, field),
                Err(_) => Err(FeedbackError::invalid(field, format!("not a number: {:?}", s))),
            }
        }
        other => Err(FeedbackError::invalid(
            field,
            format!("expected a number, got {}", type_name(other)),
        )),
    }
}

fn truncate_real(value: f64, field: &str) -> Result<i64, FeedbackError> {
    if !value.is_finite() {
        return Err(FeedbackError::invalid(field, "not a finite number"));
    }
    // Saturating float-to-int cast; clamping follows
    Ok(value.trunc() as i64)
}

fn coerce_real(value: &Value, field: &str) -> Result<f64, FeedbackError> {
    let real = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => {
            return Err(FeedbackError::invalid(
                field,
                format!("expected a number, got {}", type_name(other)),
            ));
        }
    };

    match real {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(FeedbackError::invalid(field, format!("not a finite number: {}", value))),
    }
}

fn coerce_text(value: &Value, field: &str) -> Result<String, FeedbackError> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        FeedbackError::invalid(field, format!("expected a string, got {}", type_name(value)))
    })
}

fn coerce_text_list(value: &Value, field: &str) -> Result<Vec<String>, FeedbackError> {
    let items = value.as_array().ok_or_else(|| {
        FeedbackError::invalid(field, format!("expected a list, got {}", type_name(value)))
    })?;

    if items.is_empty() {
        warn!("LLM returned an empty {} list", field);
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                FeedbackError::invalid(
                    field,
                    format!("item {} is {}, expected a string", i, type_name(item)),
                )
            })
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
