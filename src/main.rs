use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use podium::llm::personality_profile;
use podium::{
    analyze, backend_from_config, compute_metrics, execute_render, load_transcript, AudioStore,
    FeedbackConfig, FeedbackOrchestrator, FeedbackReport, InputError, LlmConfig, Personality,
    RenderConfig, SessionStore, SpeechInput,
};

/// Exit code for unusable input (blank transcript or goal)
const EXIT_INPUT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "podium")]
#[command(author, version, about = "Public speaking coach: speech metrics and AI feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a speech transcript and get coaching feedback
    Analyze {
        /// What the speaker was trying to achieve
        #[arg(short, long)]
        goal: String,

        /// Transcript text
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        transcript: Option<String>,

        /// Transcript file (`-` for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Recording length in seconds (0 = unknown)
        #[arg(short, long, default_value = "0")]
        duration: u32,

        /// Recording to store alongside the session
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Feedback style: supportive, direct, critical, humorous, mentor, professional
        #[arg(short, long, default_value = "supportive")]
        personality: String,

        /// Write the JSON result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the text report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Directory for stored sessions
        #[arg(long, default_value = "sessions")]
        sessions_dir: PathBuf,

        /// Directory for stored recordings
        #[arg(long, default_value = "uploads")]
        audio_dir: PathBuf,

        /// Do not persist the session or the recording
        #[arg(long)]
        no_save: bool,

        /// Extra LLM attempts after a failure
        #[arg(long, default_value = "0")]
        retries: u32,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compute pace and filler metrics only (no LLM)
    Metrics {
        /// Transcript text
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        transcript: Option<String>,

        /// Transcript file (`-` for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Recording length in seconds (0 = unknown)
        #[arg(short, long, default_value = "0")]
        duration: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show a stored session
    Show {
        /// Session id (UUID)
        session_id: String,

        /// Directory for stored sessions
        #[arg(long, default_value = "sessions")]
        sessions_dir: PathBuf,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the available feedback personalities
    Personalities,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            goal,
            transcript,
            input,
            duration,
            audio,
            personality,
            output,
            report,
            sessions_dir,
            audio_dir,
            no_save,
            retries,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            let transcript = load_transcript(transcript.as_deref(), input.as_deref())?;
            let speech = match SpeechInput::new(
                transcript,
                goal,
                duration,
                audio.is_some(),
                Personality::from_key(&personality),
            ) {
                Ok(speech) => speech,
                Err(e) => exit_with_input_error(e),
            };

            analyze_speech(
                speech,
                AnalyzeOptions {
                    audio,
                    output,
                    report,
                    sessions_dir,
                    audio_dir,
                    save: !no_save,
                    retries,
                    json,
                },
            )
            .await
        }
        Commands::Metrics {
            transcript,
            input,
            duration,
            verbose,
        } => {
            setup_logging(verbose);
            let transcript = load_transcript(transcript.as_deref(), input.as_deref())?;
            let metrics = compute_metrics(&transcript, duration);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok(())
        }
        Commands::Show {
            session_id,
            sessions_dir,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            show_session(&session_id, &sessions_dir, json)
        }
        Commands::Personalities => {
            list_personalities();
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn exit_with_input_error(error: InputError) -> ! {
    eprintln!("error: {}", error);
    std::process::exit(EXIT_INPUT_ERROR);
}

struct AnalyzeOptions {
    audio: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    sessions_dir: PathBuf,
    audio_dir: PathBuf,
    save: bool,
    retries: u32,
    json: bool,
}

async fn analyze_speech(speech: SpeechInput, options: AnalyzeOptions) -> Result<()> {
    let llm_config = LlmConfig::from_env()?;
    let feedback_config = FeedbackConfig {
        timeout: llm_config.timeout + Duration::from_secs(5),
        max_retries: options.retries,
    };
    let orchestrator = FeedbackOrchestrator::new(backend_from_config(&llm_config), feedback_config);
    match orchestrator.backend_name() {
        Some(name) => info!("Feedback via {} (model {})", name, llm_config.model),
        None => info!("Feedback via placeholder responses (no LLM configured)"),
    }

    store_recording(options.audio.as_deref(), &options.audio_dir, options.save)?;

    let result = match analyze(&speech, &orchestrator).await {
        Ok(result) => result,
        Err(e) => exit_with_input_error(e),
    };

    if options.save {
        SessionStore::new(&options.sessions_dir).save(&result)?;
    }

    execute_render(
        &result,
        options.output.as_deref(),
        options.report.as_deref(),
        &RenderConfig::default(),
    )?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", FeedbackReport::new(&result).format());
    }

    info!("Session {} complete", result.session_id);
    Ok(())
}

/// Copy the recording into the audio store; skipped when nothing is persisted
fn store_recording(audio: Option<&Path>, audio_dir: &Path, save: bool) -> Result<Option<PathBuf>> {
    let Some(audio_path) = audio else {
        return Ok(None);
    };
    if !save {
        info!("Not storing recording {:?} (--no-save)", audio_path);
        return Ok(None);
    }

    let bytes = std::fs::read(audio_path)
        .with_context(|| format!("Failed to read audio file: {:?}", audio_path))?;
    let original_name = audio_path.file_name().and_then(|n| n.to_str());
    let stored = AudioStore::new(audio_dir).store(&bytes, original_name)?;
    Ok(Some(stored))
}

fn show_session(session_id: &str, sessions_dir: &Path, json: bool) -> Result<()> {
    let store = SessionStore::new(sessions_dir);
    let Some(result) = store.load(session_id)? else {
        bail!("Session not found: {}", session_id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", FeedbackReport::new(&result).format());
    }
    Ok(())
}

fn list_personalities() {
    println!("Feedback Personalities");
    println!("======================");
    for personality in Personality::ALL {
        let profile = personality_profile(personality);
        println!("{:<13} {}", personality.key(), profile.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_skipped_without_save() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("take.wav");
        std::fs::write(&audio, b"RIFF").unwrap();
        let audio_dir = dir.path().join("uploads");

        let stored = store_recording(Some(audio.as_path()), &audio_dir, false).unwrap();
        assert!(stored.is_none());
        assert!(!audio_dir.exists());
    }

    #[test]
    fn test_recording_stored_when_saving() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("take.wav");
        std::fs::write(&audio, b"RIFF").unwrap();
        let audio_dir = dir.path().join("uploads");

        let stored = store_recording(Some(audio.as_path()), &audio_dir, true).unwrap().unwrap();
        assert!(stored.starts_with(&audio_dir));
        assert_eq!(std::fs::read(&stored).unwrap(), b"RIFF");
        assert!(store_recording(None, &audio_dir, true).unwrap().is_none());
    }
}
