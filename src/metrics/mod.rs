pub mod fillers;
pub mod pace;

pub use fillers::*;
pub use pace::*;

use crate::models::Metrics;

/// Configuration for deterministic metric extraction
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Filler words and phrases to tally, lower-cased, in scan order
    pub filler_words: Vec<String>,
    /// Speaking rate assumed when the recording duration is unknown
    pub assumed_wpm: u32,
    /// Floor for the estimated speaking time, in minutes
    pub min_estimated_minutes: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            filler_words: DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect(),
            assumed_wpm: 150,
            min_estimated_minutes: 0.5,
        }
    }
}

/// Compute pace and filler tallies for a transcript with the default configuration
pub fn compute_metrics(transcript: &str, duration_seconds: u32) -> Metrics {
    compute_metrics_with(transcript, duration_seconds, &MetricsConfig::default())
}

/// Compute pace and filler tallies for a transcript.
///
/// Pure and infallible: an empty transcript yields zero pace and no fillers.
pub fn compute_metrics_with(
    transcript: &str,
    duration_seconds: u32,
    config: &MetricsConfig,
) -> Metrics {
    let word_count = transcript.split_whitespace().count();
    let pace_wpm = estimate_pace(word_count, duration_seconds, config);
    let filler_counts = count_fillers(transcript, &config.filler_words);

    Metrics {
        pace_wpm,
        filler_counts,
        word_count: u32::try_from(word_count).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript() {
        let metrics = compute_metrics("", 0);
        assert_eq!(metrics.pace_wpm, 0);
        assert!(metrics.filler_counts.is_empty());
        assert_eq!(metrics.word_count, 0);
    }

    #[test]
    fn test_repeated_filler() {
        let metrics = compute_metrics("um um um", 0);
        assert_eq!(metrics.filler_counts.get("um"), 3);
        assert_eq!(metrics.filler_counts.len(), 1);
    }

    #[test]
    fn test_known_duration_pace() {
        let transcript = vec!["word"; 150].join(" ");
        let metrics = compute_metrics(&transcript, 60);
        assert_eq!(metrics.pace_wpm, 150);
        assert_eq!(metrics.word_count, 150);
    }

    #[test]
    fn test_idempotent() {
        let transcript = "so basically I think, you know, we did well. Um, right?";
        assert_eq!(compute_metrics(transcript, 12), compute_metrics(transcript, 12));
        assert_eq!(compute_metrics(transcript, 0), compute_metrics(transcript, 0));
    }

    #[test]
    fn test_custom_assumed_rate() {
        let config = MetricsConfig {
            assumed_wpm: 120,
            ..Default::default()
        };
        let transcript = vec!["word"; 300].join(" ");
        let metrics = compute_metrics_with(&transcript, 0, &config);
        assert_eq!(metrics.pace_wpm, 120);
    }

    #[test]
    fn test_quarterly_results_example() {
        let transcript = "hello so basically today I want to talk about our quarterly \
                          results um you know they were quite good.";
        let metrics = compute_metrics(transcript, 0);

        let fillers: Vec<(&str, u32)> = metrics.filler_counts.iter().collect();
        assert_eq!(
            fillers,
            vec![("um", 1), ("you know", 1), ("basically", 1), ("so", 1)]
        );
    }
}
