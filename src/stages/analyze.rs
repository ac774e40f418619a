use tracing::info;
use uuid::Uuid;

use crate::metrics::{compute_metrics_with, MetricsConfig};
use crate::models::{AnalysisResult, InputError, SpeechInput};

use super::feedback::FeedbackOrchestrator;

/// Analyze one speech with the default metrics configuration
pub async fn analyze(
    input: &SpeechInput,
    orchestrator: &FeedbackOrchestrator,
) -> Result<AnalysisResult, InputError> {
    analyze_with(input, orchestrator, &MetricsConfig::default()).await
}

/// Analyze one speech: deterministic metrics plus LLM feedback.
///
/// Only input errors are returned; LLM problems degrade to fallback
/// feedback inside the orchestrator. The result is not persisted here.
pub async fn analyze_with(
    input: &SpeechInput,
    orchestrator: &FeedbackOrchestrator,
    metrics_config: &MetricsConfig,
) -> Result<AnalysisResult, InputError> {
    input.validate()?;

    let session_id = Uuid::new_v4().to_string();
    info!(
        "Session {}: analyzing {} words (duration {}s, audio {}, personality {})",
        session_id,
        input.word_count(),
        input.duration_seconds,
        input.audio_present,
        input.personality
    );

    let metrics = compute_metrics_with(&input.transcript, input.duration_seconds, metrics_config);
    info!(
        "Metrics: {} words, {} WPM, {} filler types",
        metrics.word_count,
        metrics.pace_wpm,
        metrics.filler_counts.len()
    );

    let feedback = orchestrator.feedback_for(input).await;

    Ok(AnalysisResult::new(session_id, input, metrics, feedback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackRecord, Personality};

    fn input(transcript: &str) -> SpeechInput {
        SpeechInput::new(transcript, "Explain the plan", 60, false, Personality::Critical).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_unconfigured() {
        let orchestrator = FeedbackOrchestrator::unconfigured();
        let result = analyze(&input("um so we will um ship it"), &orchestrator)
            .await
            .unwrap();

        assert_eq!(result.metrics.pace_wpm, 7);
        assert_eq!(result.metrics.filler_counts.get("um"), 2);
        assert_eq!(result.metrics.filler_counts.get("so"), 1);
        assert_eq!(result.feedback, FeedbackRecord::unconfigured("Explain the plan"));
        assert_eq!(result.goal, "Explain the plan");
        assert_eq!(result.duration_seconds, 60);
        assert_eq!(result.personality, Personality::Critical);
        assert!(Uuid::parse_str(&result.session_id).is_ok());
    }

    #[tokio::test]
    async fn test_custom_metrics_config() {
        let config = MetricsConfig {
            filler_words: vec!["ship it".to_string()],
            ..Default::default()
        };
        let result = analyze_with(
            &input("um so we will um ship it"),
            &FeedbackOrchestrator::unconfigured(),
            &config,
        )
        .await
        .unwrap();

        assert_eq!(result.metrics.filler_counts.get("ship it"), 1);
        assert_eq!(result.metrics.filler_counts.get("um"), 0);
    }

    #[tokio::test]
    async fn test_session_ids_are_unique() {
        let orchestrator = FeedbackOrchestrator::unconfigured();
        let speech = input("hello world");
        let a = analyze(&speech, &orchestrator).await.unwrap();
        let b = analyze(&speech, &orchestrator).await.unwrap();
        assert_ne!(a.session_id, b.session_id);
    }

    #[tokio::test]
    async fn test_rejects_blanked_input() {
        let orchestrator = FeedbackOrchestrator::unconfigured();
        let mut speech = input("hello world");
        speech.transcript = "   ".to_string();

        let err = analyze(&speech, &orchestrator).await.unwrap_err();
        assert_eq!(err, InputError::EmptyTranscript);

        speech.transcript = "hello".to_string();
        speech.goal = "\n".to_string();
        let err = analyze(&speech, &orchestrator).await.unwrap_err();
        assert_eq!(err, InputError::EmptyGoal);
    }
}
