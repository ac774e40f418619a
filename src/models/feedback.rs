use serde::{Deserialize, Serialize};

/// Longest excerpt of a failure reason quoted back in the fallback summary
pub const FALLBACK_REASON_MAX_CHARS: usize = 100;

/// Qualitative coaching feedback for one speech.
///
/// Scores are always within range: 0-100 for the four dimensions and
/// 0.0-10.0 overall, whether the record came from the LLM or a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// One or two sentence summary of what the speaker communicated
    #[serde(rename = "aiSummary")]
    pub summary: String,
    pub clarity_score: u8,
    pub confidence_score: u8,
    pub engagement_score: u8,
    pub structure_score: u8,
    #[serde(rename = "overall_score")]
    pub overall_score: f64,
    /// Main improvement opportunity with actionable advice
    pub constructive_tip: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl FeedbackRecord {
    /// Placeholder feedback used when no LLM is configured.
    ///
    /// Deterministic for a given goal; no network call is involved.
    pub fn unconfigured(goal: &str) -> Self {
        Self {
            summary: format!("The speaker discussed their intended goal: {}", goal.trim()),
            clarity_score: 75,
            confidence_score: 70,
            engagement_score: 65,
            structure_score: 70,
            overall_score: 7.0,
            constructive_tip: "Configure GEMINI_API_KEY (or ANTHROPIC_API_KEY with \
                               PODIUM_LLM_PROVIDER=anthropic) in your .env file to get \
                               AI-powered feedback!"
                .to_string(),
            strengths: vec![
                "Speech recorded successfully".to_string(),
                "Basic structure present".to_string(),
                "Clear intention".to_string(),
            ],
            improvements: vec![
                "AI analysis unavailable".to_string(),
                "Please configure an LLM API key".to_string(),
                "Enable full feedback system".to_string(),
            ],
        }
    }

    /// Moderate fallback feedback used when the LLM path fails
    pub fn error_fallback(reason: &str) -> Self {
        let excerpt: String = reason.chars().take(FALLBACK_REASON_MAX_CHARS).collect();
        Self {
            summary: format!("Unable to generate AI feedback. Error: {}", excerpt),
            clarity_score: 70,
            confidence_score: 65,
            engagement_score: 60,
            structure_score: 70,
            overall_score: 6.6,
            constructive_tip: "The AI analysis service encountered an error. Please try again \
                               or check your API configuration."
                .to_string(),
            strengths: vec![
                "Speech recorded successfully".to_string(),
                "Basic structure present".to_string(),
            ],
            improvements: vec![
                "AI analysis unavailable".to_string(),
                "Please check your LLM API configuration".to_string(),
            ],
        }
    }

    /// Mean of the four 0-100 dimension scores
    pub fn average_dimension_score(&self) -> f64 {
        let sum = self.clarity_score as u32
            + self.confidence_score as u32
            + self.engagement_score as u32
            + self.structure_score as u32;
        sum as f64 / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_is_deterministic() {
        let a = FeedbackRecord::unconfigured("Explain results");
        let b = FeedbackRecord::unconfigured("Explain results");
        assert_eq!(a, b);
        assert!(a.summary.contains("Explain results"));
        assert_eq!(a.clarity_score, 75);
        assert_eq!(a.overall_score, 7.0);
    }

    #[test]
    fn test_error_fallback_truncates_reason() {
        let reason = "x".repeat(500);
        let record = FeedbackRecord::error_fallback(&reason);
        let quoted = record
            .summary
            .strip_prefix("Unable to generate AI feedback. Error: ")
            .unwrap();
        assert_eq!(quoted.chars().count(), FALLBACK_REASON_MAX_CHARS);
        assert_eq!(record.overall_score, 6.6);
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(FeedbackRecord::error_fallback("boom")).unwrap();
        for key in [
            "aiSummary",
            "clarityScore",
            "confidenceScore",
            "engagementScore",
            "structureScore",
            "overall_score",
            "constructiveTip",
            "strengths",
            "improvements",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_average_dimension_score() {
        let record = FeedbackRecord::unconfigured("goal");
        assert_eq!(record.average_dimension_score(), 70.0);
    }
}
