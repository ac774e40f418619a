pub mod io;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod stages;

pub use io::{load_transcript, AudioStore, FeedbackReport, SessionStore};
pub use llm::{backend_from_config, AnthropicClient, GeminiClient, LlmBackend, LlmConfig, LlmError, LlmProvider};
pub use metrics::{compute_metrics, compute_metrics_with, MetricsConfig};
pub use models::{AnalysisResult, FeedbackRecord, InputError, Metrics, Personality, SpeechInput};
pub use stages::{
    analyze, analyze_with, execute_render, FeedbackConfig, FeedbackOrchestrator, RenderConfig,
};
