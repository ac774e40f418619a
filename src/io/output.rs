use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisResult;

/// Write an analysis result as pretty JSON
pub fn write_result_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, result).context("Failed to write JSON")?;
    Ok(())
}

/// Human-readable feedback report
pub struct FeedbackReport<'a> {
    result: &'a AnalysisResult,
}

impl<'a> FeedbackReport<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self { result }
    }

    /// Format the report as plain text
    pub fn format(&self) -> String {
        let result = self.result;
        let metrics = &result.metrics;
        let feedback = &result.feedback;
        let mut output = String::new();

        push_heading(&mut output, "Speech Feedback Report", '=');
        output.push_str(&format!("Session: {}\n", result.session_id));
        output.push_str(&format!(
            "Recorded: {}\n",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("Goal: {}\n", result.goal.trim()));
        output.push_str(&format!("Feedback style: {}\n\n", result.personality));

        push_heading(&mut output, "Metrics", '-');
        output.push_str(&format!("Words: {}\n", metrics.word_count));
        if result.duration_seconds > 0 {
            output.push_str(&format!(
                "Duration: {}\n",
                format_duration(result.duration_seconds)
            ));
            output.push_str(&format!("Pace: {} WPM\n", metrics.pace_wpm));
        } else {
            output.push_str("Duration: unknown\n");
            output.push_str(&format!("Pace: {} WPM (estimated)\n", metrics.pace_wpm));
        }
        if metrics.filler_counts.is_empty() {
            output.push_str("Filler words: none detected\n\n");
        } else {
            let fillers: Vec<String> = metrics
                .filler_counts
                .iter()
                .map(|(filler, count)| format!("\"{}\" x{}", filler, count))
                .collect();
            output.push_str(&format!(
                "Filler words ({} total): {}\n\n",
                metrics.filler_counts.total(),
                fillers.join(", ")
            ));
        }

        push_heading(&mut output, "Scores", '-');
        output.push_str(&format!("Clarity:    {:>3}/100\n", feedback.clarity_score));
        output.push_str(&format!("Confidence: {:>3}/100\n", feedback.confidence_score));
        output.push_str(&format!("Engagement: {:>3}/100\n", feedback.engagement_score));
        output.push_str(&format!("Structure:  {:>3}/100\n", feedback.structure_score));
        output.push_str(&format!("Average:    {:>5.1}/100\n", feedback.average_dimension_score()));
        output.push_str(&format!("Overall:    {:.1}/10\n\n", feedback.overall_score));

        push_heading(&mut output, "Summary", '-');
        output.push_str(&wrap_text(&feedback.summary, 80));
        output.push_str("\n\n");

        push_heading(&mut output, "Strengths", '-');
        push_bullets(&mut output, &feedback.strengths);

        push_heading(&mut output, "Improvements", '-');
        push_bullets(&mut output, &feedback.improvements);

        push_heading(&mut output, "Tip", '-');
        output.push_str(&wrap_text(&feedback.constructive_tip, 80));
        output.push('\n');

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn push_heading(output: &mut String, title: &str, underline: char) {
    output.push_str(title);
    output.push('\n');
    output.extend(std::iter::repeat_n(underline, title.chars().count()));
    output.push('\n');
}

fn push_bullets(output: &mut String, items: &[String]) {
    if items.is_empty() {
        output.push_str("(none)\n\n");
        return;
    }
    for item in items {
        let wrapped = wrap_text(item, 76).replace('\n', "\n  ");
        output.push_str(&format!("- {}\n", wrapped));
    }
    output.push('\n');
}

/// Format seconds as M:SS
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackRecord, FillerCounts, Metrics, Personality, SpeechInput};

    fn result(duration_seconds: u32) -> AnalysisResult {
        let input = SpeechInput::new(
            "um so our results were good you know",
            "Share results",
            duration_seconds,
            false,
            Personality::Professional,
        )
        .unwrap();
        let mut fillers = FillerCounts::new();
        fillers.add("um", 1);
        fillers.add("you know", 1);
        fillers.add("so", 1);
        AnalysisResult::new(
            "8d5e1a3c-2b4f-4c6d-9e8f-0a1b2c3d4e5f".to_string(),
            &input,
            Metrics {
                pace_wpm: 96,
                filler_counts: fillers,
                word_count: 8,
            },
            FeedbackRecord::error_fallback("connection refused"),
        )
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(45), "0:45");
        assert_eq!(format_duration(125), "2:05");
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a test of the text wrapping function that should wrap at 20 chars";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.len() <= 25); // Allow some slack for long words
        }
    }

    #[test]
    fn test_report_contents() {
        let report = FeedbackReport::new(&result(5)).format();

        assert!(report.contains("Session: 8d5e1a3c-2b4f-4c6d-9e8f-0a1b2c3d4e5f"));
        assert!(report.contains("Goal: Share results"));
        assert!(report.contains("Feedback style: professional"));
        assert!(report.contains("Duration: 0:05"));
        assert!(report.contains("Pace: 96 WPM\n"));
        assert!(report.contains("Filler words (3 total): \"um\" x1, \"you know\" x1, \"so\" x1"));
        assert!(report.contains("Clarity:     70/100"));
        let average = FeedbackRecord::error_fallback("").average_dimension_score();
        assert_eq!(average, 66.25);
        assert!(report.contains(&format!("Average:    {:>5.1}/100", average)));
        assert!(report.contains("Overall:    6.6/10"));
        assert!(report.contains("- AI analysis unavailable"));
        assert!(report.contains("connection refused"));
    }

    #[test]
    fn test_report_with_unknown_duration() {
        let report = FeedbackReport::new(&result(0)).format();
        assert!(report.contains("Duration: unknown"));
        assert!(report.contains("Pace: 96 WPM (estimated)"));
    }

    #[test]
    fn test_write_result_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let result = result(30);

        write_result_json(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: AnalysisResult = serde_json::from_str(&content).unwrap();
        assert_eq!(back, result);
    }
}
