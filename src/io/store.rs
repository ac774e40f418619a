use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::AnalysisResult;

/// Extension used when an upload has none
const DEFAULT_AUDIO_EXTENSION: &str = "webm";

/// File-backed store of analysis results, one `<session_id>.json` per session
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a result. Written to a temp file first and renamed into place
    /// so readers never see a partial record.
    pub fn save(&self, result: &AnalysisResult) -> Result<PathBuf> {
        let id = parse_session_id(&result.session_id)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create session directory: {:?}", self.dir))?;

        let path = self.session_path(&id);
        let tmp = self.dir.join(format!(".{}.json.tmp", id));

        let json = serde_json::to_vec_pretty(result).context("Failed to serialize session")?;
        std::fs::write(&tmp, json).with_context(|| format!("Failed to write file: {:?}", tmp))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to move session into place: {:?}", path))?;

        info!("Session {} saved to {:?}", id, path);
        Ok(path)
    }

    /// Load a stored result; `Ok(None)` when no session has this id
    pub fn load(&self, session_id: &str) -> Result<Option<AnalysisResult>> {
        let id = parse_session_id(session_id)?;
        let path = self.session_path(&id);

        if !path.exists() {
            debug!("Session {} not found in {:?}", id, self.dir);
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let result = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {:?}", path))?;
        Ok(Some(result))
    }

    fn session_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

/// Session ids are UUIDs; anything else could escape the store directory
fn parse_session_id(session_id: &str) -> Result<Uuid> {
    match Uuid::parse_str(session_id.trim()) {
        Ok(id) => Ok(id),
        Err(_) => bail!("Invalid session id: {:?}", session_id),
    }
}

/// Stores uploaded recordings under generated, collision-free names
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the recording bytes, keeping the original extension.
    ///
    /// Names look like `recording_20250101_093000_1a2b3c4d.webm`.
    pub fn store(&self, bytes: &[u8], original_name: Option<&str>) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create audio directory: {:?}", self.dir))?;

        let extension = original_name
            .map(Path::new)
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_AUDIO_EXTENSION.to_string());

        let short_id = Uuid::new_v4().simple().to_string();
        let filename = format!(
            "recording_{}_{}.{}",
            Utc::now().format("%Y%m%d_%H%M%S"),
            &short_id[..8],
            extension
        );
        let path = self.dir.join(filename);

        std::fs::write(&path, bytes).with_context(|| format!("Failed to write file: {:?}", path))?;
        info!("Stored {} bytes of audio at {:?}", bytes.len(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackRecord, Metrics, Personality, SpeechInput};

    fn result() -> AnalysisResult {
        let input = SpeechInput::new(
            "so basically we grew revenue",
            "Report growth",
            20,
            true,
            Personality::Mentor,
        )
        .unwrap();
        AnalysisResult::new(
            Uuid::new_v4().to_string(),
            &input,
            Metrics::default(),
            FeedbackRecord::unconfigured("Report growth"),
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("sessions"));
        let result = result();

        let path = store.save(&result).unwrap();
        assert_eq!(path, store.dir().join(format!("{}.json", result.session_id)));

        let loaded = store.load(&result.session_id).unwrap();
        assert_eq!(loaded, Some(result));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save(&result()).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".json"));
        assert!(!names[0].starts_with('.'));
    }

    #[test]
    fn test_load_unknown_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let loaded = store.load(&Uuid::new_v4().to_string()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_rejects_non_uuid_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load("../../etc/passwd").is_err());
        assert!(store.load("").is_err());
    }

    #[test]
    fn test_store_audio_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path());

        let path = store.store(b"RIFF....", Some("take1.WAV")).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("recording_"));
        assert!(name.ends_with(".wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF....");
    }

    #[test]
    fn test_store_audio_default_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path());

        let a = store.store(b"a", None).unwrap();
        let b = store.store(b"b", Some("blob")).unwrap();
        assert_eq!(a.extension().unwrap(), "webm");
        assert_eq!(b.extension().unwrap(), "webm");
        assert_ne!(a, b);
    }
}
