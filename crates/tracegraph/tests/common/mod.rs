#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn base_time() -> DateTime<Utc> {
    "2025-02-01T12:00:00Z".parse().unwrap()
}

/// Builds a Claude-style session transcript line by line
#[derive(Default)]
pub struct TranscriptBuilder {
    lines: Vec<String>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thinking(mut self, offset_secs: i64, text: &str) -> Self {
        let record = json!({
            "type": "assistant",
            "timestamp": (base_time() + Duration::seconds(offset_secs)).to_rfc3339(),
            "message": {"role": "assistant", "content": [{"type": "thinking", "thinking": text}]},
        });
        self.lines.push(record.to_string());
        self
    }

    pub fn tool(mut self, offset_secs: i64, name: &str) -> Self {
        let record = json!({
            "type": "assistant",
            "timestamp": (base_time() + Duration::seconds(offset_secs)).to_rfc3339(),
            "message": {"role": "assistant", "content": [{"type": "tool_use", "id": "toolu_1", "name": name, "input": {}}]},
        });
        self.lines.push(record.to_string());
        self
    }

    pub fn user(mut self, offset_secs: i64, text: &str) -> Self {
        let record = json!({
            "type": "user",
            "timestamp": (base_time() + Duration::seconds(offset_secs)).to_rfc3339(),
            "message": {"role": "user", "content": text},
        });
        self.lines.push(record.to_string());
        self
    }

    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    pub fn write_to(self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

pub fn commit_session() -> TranscriptBuilder {
    TranscriptBuilder::new()
        .user(0, "please commit")
        .thinking(1, "The staged files look complete. Commit the changes and push the branch.")
        .tool(5, "Bash")
        .tool(8, "Read")
}

pub fn recovery_session() -> TranscriptBuilder {
    TranscriptBuilder::new()
        .thinking(0, "The build failed with a type error. Let me check the error output.")
        .tool(10, "Read")
        .tool(20, "Edit")
        .thinking(300, "I'll plan the migration first. Then run the schema tests.")
        .tool(310, "Bash")
        .tool(315, "Grep")
}
