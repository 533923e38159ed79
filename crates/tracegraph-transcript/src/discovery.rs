//! Locating session transcripts on disk

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A transcript file plus the identity it contributes to the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSource {
    pub path: PathBuf,
    pub session_id: String,
    pub project: String,
}

impl SessionSource {
    /// Session id is the file stem; project is the last `-` component of the
    /// parent folder (Claude names project folders after the dashed cwd), or
    /// the file stem when the folder name has no dash.
    pub fn from_path(path: &Path) -> Self {
        let session_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let project = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .filter(|name| name.contains('-'))
            .and_then(|name| name.rsplit('-').find(|part| !part.is_empty()))
            .unwrap_or(&session_id)
            .to_string();

        Self {
            path: path.to_path_buf(),
            session_id,
            project,
        }
    }
}

fn jsonl_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("jsonl")
        })
        .collect()
}

fn modified(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Find session transcripts under `dir`, newest first.
///
/// Looks at `dir/*.jsonl`, falling back to `dir/*/*.jsonl`. Sub-agent
/// transcripts (`agent-*.jsonl`) are skipped.
pub fn discover_sessions(dir: &Path, limit: usize) -> Vec<SessionSource> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files = jsonl_files(dir);
    if files.is_empty() {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    files.extend(jsonl_files(&path));
                }
            }
        }
    }

    files.retain(|path| {
        !path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("agent-"))
    });
    files.sort_by(|a, b| modified(b).cmp(&modified(a)).then_with(|| a.cmp(b)));
    files.truncate(limit);

    files.iter().map(|p| SessionSource::from_path(p)).collect()
}
