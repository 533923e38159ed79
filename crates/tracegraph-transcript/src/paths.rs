//! Path resolution for transcripts, config and the index snapshot

use std::path::PathBuf;

/// Resolves standard locations under `~/.claude`
#[derive(Debug, Clone)]
pub struct Paths {
    pub home_claude: PathBuf,
}

impl Paths {
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".claude")))
    }

    pub fn with_root(home_claude: impl Into<PathBuf>) -> Self {
        Self {
            home_claude: home_claude.into(),
        }
    }

    /// Claude Code session transcripts, one folder per project
    pub fn projects_dir(&self) -> PathBuf {
        self.home_claude.join("projects")
    }

    pub fn config_file(&self) -> PathBuf {
        self.home_claude.join("tracegraph.json")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.home_claude.join("tracegraph")
    }

    /// Cached aggregated index
    pub fn index_snapshot(&self) -> PathBuf {
        self.data_dir().join("index.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_new() {
        let paths = Paths::new().unwrap();
        assert!(paths.home_claude.ends_with(".claude"));
    }

    #[test]
    fn test_projects_dir() {
        let paths = Paths::with_root("/home/u/.claude");
        assert_eq!(paths.projects_dir(), PathBuf::from("/home/u/.claude/projects"));
    }

    #[test]
    fn test_index_snapshot() {
        let paths = Paths::with_root("/home/u/.claude");
        let snapshot = paths.index_snapshot();
        assert!(snapshot.ends_with("tracegraph/index.json"));
        assert!(paths.config_file().ends_with("tracegraph.json"));
    }
}
