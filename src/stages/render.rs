use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{write_result_json, FeedbackReport};
use crate::models::AnalysisResult;

/// Configuration for rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to write the JSON result
    pub generate_json: bool,
    /// Whether to write the text report
    pub generate_report: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            generate_json: true,
            generate_report: true,
        }
    }
}

/// Paths written by rendering
#[derive(Debug, Default)]
pub struct RenderResult {
    pub json_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

/// Write the analysis result to disk.
///
/// Produces up to two views:
/// 1. JSON: the full wire-format result
/// 2. Report: human-readable coaching summary
pub fn execute_render(
    result: &AnalysisResult,
    json_output: Option<&Path>,
    report_output: Option<&Path>,
    config: &RenderConfig,
) -> Result<RenderResult> {
    let mut rendered = RenderResult::default();

    if config.generate_json {
        if let Some(path) = json_output {
            info!("Writing result JSON to {:?}", path);
            write_result_json(result, path)?;
            rendered.json_path = Some(path.to_path_buf());
        }
    }

    if config.generate_report {
        if let Some(path) = report_output {
            info!("Writing feedback report to {:?}", path);
            FeedbackReport::new(result).write_file(path)?;
            rendered.report_path = Some(path.to_path_buf());
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackRecord, Metrics, Personality, SpeechInput};

    fn result() -> AnalysisResult {
        let input =
            SpeechInput::new("hello everyone", "Greet", 3, false, Personality::Humorous).unwrap();
        AnalysisResult::new(
            "0f0e0d0c-0b0a-4908-8706-050403020100".to_string(),
            &input,
            Metrics::default(),
            FeedbackRecord::unconfigured("Greet"),
        )
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert!(config.generate_json);
        assert!(config.generate_report);
    }

    #[test]
    fn test_render_both_views() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("out.json");
        let report = dir.path().join("out.txt");

        let rendered = execute_render(
            &result(),
            Some(json.as_path()),
            Some(report.as_path()),
            &RenderConfig::default(),
        )
        .unwrap();

        assert_eq!(rendered.json_path.as_deref(), Some(json.as_path()));
        assert_eq!(rendered.report_path.as_deref(), Some(report.as_path()));
        let text = std::fs::read_to_string(&report).unwrap();
        assert!(text.contains("The speaker discussed their intended goal: Greet"));
    }

    #[test]
    fn test_disabled_view_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("out.json");
        let config = RenderConfig {
            generate_json: false,
            ..Default::default()
        };

        let rendered = execute_render(&result(), Some(json.as_path()), None, &config).unwrap();
        assert!(rendered.json_path.is_none());
        assert!(rendered.report_path.is_none());
        assert!(!json.exists());
    }
}
