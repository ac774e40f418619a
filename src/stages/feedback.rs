use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::llm::{build_feedback_prompt, parse_feedback_response, FeedbackError, LlmBackend, LlmError};
use crate::models::{FeedbackRecord, Personality, SpeechInput};

/// Configuration for the feedback stage
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// Upper bound on a single LLM call
    pub timeout: Duration,
    /// Extra attempts after a failed call or unusable response
    pub max_retries: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
        }
    }
}

/// Produces coaching feedback through an optional LLM backend.
///
/// Never fails: with no backend it returns the unconfigured placeholder, and
/// any error on the LLM path resolves to the error fallback record.
pub struct FeedbackOrchestrator {
    backend: Option<Arc<dyn LlmBackend>>,
    config: FeedbackConfig,
}

impl FeedbackOrchestrator {
    pub fn new(backend: Option<Arc<dyn LlmBackend>>, config: FeedbackConfig) -> Self {
        Self { backend, config }
    }

    /// Orchestrator with no LLM; always yields the placeholder record
    pub fn unconfigured() -> Self {
        Self::new(None, FeedbackConfig::default())
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Name of the configured backend, if any
    pub fn backend_name(&self) -> Option<&str> {
        self.backend.as_deref().map(|b| b.name())
    }

    /// Feedback for a validated speech input
    pub async fn feedback_for(&self, input: &SpeechInput) -> FeedbackRecord {
        self.get_feedback(
            &input.transcript,
            &input.goal,
            input.audio_present,
            input.duration_seconds,
            input.personality,
        )
        .await
    }

    /// Get coaching feedback for a speech.
    ///
    /// 1. No backend: unconfigured placeholder, no network call
    /// 2. Build the prompt and call the LLM under the configured timeout
    /// 3. Strip fences, parse JSON, check required fields, normalize
    /// 4. Any failure: error fallback record
    pub async fn get_feedback(
        &self,
        transcript: &str,
        goal: &str,
        audio_present: bool,
        duration_seconds: u32,
        personality: Personality,
    ) -> FeedbackRecord {
        let Some(backend) = self.backend.as_deref() else {
            warn!("LLM not configured, using placeholder feedback");
            return FeedbackRecord::unconfigured(goal);
        };

        let prompt =
            build_feedback_prompt(transcript, goal, duration_seconds, audio_present, personality);
        debug!(
            "Feedback prompt built ({} chars, personality {})",
            prompt.len(),
            personality
        );

        match self.request_with_retries(backend, &prompt).await {
            Ok(record) => {
                info!(
                    "LLM analysis complete: clarity {}/100, confidence {}/100, engagement {}/100, structure {}/100, overall {}/10",
                    record.clarity_score,
                    record.confidence_score,
                    record.engagement_score,
                    record.structure_score,
                    record.overall_score
                );
                record
            }
            Err(e) => {
                warn!("LLM feedback failed, using fallback: {}", e);
                FeedbackRecord::error_fallback(&e.to_string())
            }
        }
    }

    async fn request_with_retries(
        &self,
        backend: &dyn LlmBackend,
        prompt: &str,
    ) -> Result<FeedbackRecord, FeedbackError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                info!("Feedback: retry {} of {}", attempt, self.config.max_retries);
            }

            match self.request_once(backend, prompt).await {
                Ok(record) => return Ok(record),
                Err(e) => {
                    warn!("Feedback attempt {} via {} failed: {}", attempt + 1, backend.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(FeedbackError::Llm(LlmError::EmptyResponse)))
    }

    async fn request_once(
        &self,
        backend: &dyn LlmBackend,
        prompt: &str,
    ) -> Result<FeedbackRecord, FeedbackError> {
        info!("Calling {} for speech analysis...", backend.name());

        let text = tokio::time::timeout(self.config.timeout, backend.generate(prompt))
            .await
            .map_err(|_| LlmError::Timeout)??;

        debug!("Received response from {} ({} chars)", backend.name(), text.len());
        parse_feedback_response(&text)
    }
}
