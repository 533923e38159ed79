//! Transcript reading and atomic file writes

use crate::record::{parse_transcript, Transcript};
use std::path::Path;
use tracegraph_core::{Result, TraceError};

/// Read and decode a transcript file.
///
/// Fails only when the file cannot be opened or is not valid UTF-8; bad
/// individual lines are counted in [`Transcript::malformed_records`].
pub fn read_transcript(path: &Path) -> Result<Transcript> {
    let content =
        std::fs::read_to_string(path).map_err(|source| TraceError::TranscriptUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_transcript(&content))
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_transcript_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing.jsonl");
        let err = read_transcript(&path).unwrap_err();
        assert!(matches!(err, TraceError::TranscriptUnreadable { .. }));
    }

    #[test]
    fn test_read_transcript_invalid_utf8() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("binary.jsonl");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x81]).unwrap();
        let err = read_transcript(&path).unwrap_err();
        assert!(matches!(err, TraceError::TranscriptUnreadable { .. }));
    }

    #[test]
    fn test_read_transcript_counts_records() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("session.jsonl");
        let content = [
            r#"{"type":"thinking","timestamp":"2025-01-01T00:00:00Z","thinking":"Plan the work."}"#,
            "{not json",
            "",
            r#"{"type":"tool_use","timestamp":"2025-01-01T00:00:05Z","name":"Read"}"#,
        ]
        .join("\n");
        std::fs::write(&path, content).unwrap();

        let transcript = read_transcript(&path).unwrap();
        assert_eq!(transcript.total_records, 3);
        assert_eq!(transcript.malformed_records, 1);
        assert_eq!(transcript.reasoning.len(), 1);
        assert_eq!(transcript.tool_calls.len(), 1);
    }

    #[test]
    fn test_atomic_write() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_file = temp.path().join("nested").join("index.json");

        atomic_write(&test_file, b"{}").unwrap();

        let read_data = std::fs::read(&test_file).unwrap();
        assert_eq!(read_data, b"{}");
        assert!(!test_file.with_extension("tmp").exists());
    }
}
