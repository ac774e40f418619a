use tracing::debug;

use super::MetricsConfig;

/// Estimate speaking pace in words per minute.
///
/// With a known duration this is `floor(words / minutes)`. When the duration
/// is unknown (0) the speaking time is estimated at `config.assumed_wpm`,
/// floored at `config.min_estimated_minutes` so very short transcripts do not
/// report an inflated pace.
pub fn estimate_pace(word_count: usize, duration_seconds: u32, config: &MetricsConfig) -> u32 {
    if duration_seconds > 0 {
        let pace = word_count as u64 * 60 / duration_seconds as u64;
        debug!(
            "Pace: {} words / {:.2} minutes = {} WPM",
            word_count,
            duration_seconds as f64 / 60.0,
            pace
        );
        return u32::try_from(pace).unwrap_or(u32::MAX);
    }

    if word_count == 0 || config.assumed_wpm == 0 {
        return 0;
    }

    let estimated_minutes = word_count as f64 / config.assumed_wpm as f64;
    let pace = if estimated_minutes >= config.min_estimated_minutes {
        // words / (words / rate) is exactly the assumed rate
        config.assumed_wpm
    } else {
        let minutes = config.min_estimated_minutes.max(f64::EPSILON);
        (word_count as f64 / minutes).floor() as u32
    };

    debug!("Duration unknown, estimated pace: {} WPM", pace);
    pace
}
