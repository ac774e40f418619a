use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FeedbackRecord, Metrics, Personality, SpeechInput};

/// Complete result of one analysis request.
///
/// This is the stable client-facing schema: metrics and feedback fields are
/// flattened next to the session id and the echoed request fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique identifier generated once per request (UUID v4)
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(flatten)]
    pub metrics: Metrics,
    #[serde(flatten)]
    pub feedback: FeedbackRecord,
    pub transcript: String,
    #[serde(rename = "userGoal")]
    pub goal: String,
    /// Recording duration in seconds (0 when unknown)
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    #[serde(rename = "audioPresent", default)]
    pub audio_present: bool,
    #[serde(rename = "aiPersonality", default)]
    pub personality: Personality,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Assemble a result for `input`, stamping it with the current time
    pub fn new(
        session_id: String,
        input: &SpeechInput,
        metrics: Metrics,
        feedback: FeedbackRecord,
    ) -> Self {
        Self {
            session_id,
            metrics,
            feedback,
            transcript: input.transcript.clone(),
            goal: input.goal.clone(),
            duration_seconds: input.duration_seconds,
            audio_present: input.audio_present,
            personality: input.personality,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FillerCounts;

    fn sample() -> AnalysisResult {
        let input = SpeechInput::new(
            "so basically um the results were good",
            "Share the results",
            20,
            true,
            Personality::Direct,
        )
        .unwrap();
        let mut fillers = FillerCounts::new();
        fillers.add("um", 1);
        fillers.add("basically", 1);
        fillers.add("so", 1);
        let metrics = Metrics {
            pace_wpm: 21,
            filler_counts: fillers,
            word_count: 7,
        };
        AnalysisResult::new(
            "5f0c6f3e-8c1f-4b59-9a53-6c3a1f1d2e4b".to_string(),
            &input,
            metrics,
            FeedbackRecord::unconfigured(&input.goal),
        )
    }

    #[test]
    fn test_flattened_schema() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["sessionId"], "5f0c6f3e-8c1f-4b59-9a53-6c3a1f1d2e4b");
        assert_eq!(value["pace"], 21);
        assert_eq!(value["fillerWords"]["um"], 1);
        assert_eq!(value["clarityScore"], 75);
        assert_eq!(value["overall_score"], 7.0);
        assert_eq!(value["userGoal"], "Share the results");
        assert_eq!(value["duration"], 20);
        assert_eq!(value["aiPersonality"], "direct");
        assert!(value["aiSummary"].is_string());
        assert!(value.get("metrics").is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_filler_order() {
        let result = sample();
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back, result);
        let order: Vec<&str> = back.metrics.filler_counts.iter().map(|(f, _)| f).collect();
        assert_eq!(order, vec!["um", "basically", "so"]);
    }
}
