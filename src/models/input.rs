use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Personality;

/// Caller errors detected before any analysis runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("transcript cannot be empty")]
    EmptyTranscript,
    #[error("user goal cannot be empty")]
    EmptyGoal,
}

/// A single analysis request, normalized from whatever surface produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechInput {
    /// The spoken text to analyze
    pub transcript: String,
    /// What the speaker intended to get across
    pub goal: String,
    /// Recording length in seconds (0 when unknown)
    pub duration_seconds: u32,
    /// Whether an audio recording accompanied the transcript
    pub audio_present: bool,
    /// Feedback style requested by the speaker
    pub personality: Personality,
}

impl SpeechInput {
    /// Build a validated input; transcript and goal must be non-empty after trimming
    pub fn new(
        transcript: impl Into<String>,
        goal: impl Into<String>,
        duration_seconds: u32,
        audio_present: bool,
        personality: Personality,
    ) -> Result<Self, InputError> {
        let input = Self {
            transcript: transcript.into(),
            goal: goal.into(),
            duration_seconds,
            audio_present,
            personality,
        };
        input.validate()?;
        Ok(input)
    }

    /// Check the non-empty invariants again (fields are public)
    pub fn validate(&self) -> Result<(), InputError> {
        if self.transcript.trim().is_empty() {
            return Err(InputError::EmptyTranscript);
        }
        if self.goal.trim().is_empty() {
            return Err(InputError::EmptyGoal);
        }
        Ok(())
    }

    /// Number of whitespace-delimited words in the transcript
    pub fn word_count(&self) -> usize {
        self.transcript.split_whitespace().count()
    }
}
