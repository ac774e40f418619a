use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Load a transcript from inline text or a file (`-` reads stdin)
pub fn load_transcript(text: Option<&str>, path: Option<&Path>) -> Result<String> {
    match (text, path) {
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => read_transcript_file(path),
        (Some(_), Some(_)) => bail!("Pass either an inline transcript or a transcript file, not both"),
        (None, None) => bail!("No transcript given"),
    }
}

/// Read a transcript file; `-` reads from stdin
pub fn read_transcript_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read transcript from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_inline_transcript() {
        let text = load_transcript(Some("hello world"), None).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_transcript_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "so um this is my speech").unwrap();

        let text = load_transcript(None, Some(file.path())).unwrap();
        assert_eq!(text, "so um this is my speech");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_transcript(None, Some(Path::new("/definitely/not/here.txt")));
        assert!(result.is_err());
    }

    #[test]
    fn test_ambiguous_source_is_an_error() {
        assert!(load_transcript(Some("a"), Some(Path::new("b.txt"))).is_err());
        assert!(load_transcript(None, None).is_err());
    }
}
