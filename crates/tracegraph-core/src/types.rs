//! Decision trace records and the decision-type vocabulary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decision-type taxonomy. `General` is the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Planning,
    Sequencing,
    Recovery,
    Clarification,
    ContextAwareness,
    General,
}

impl DecisionType {
    pub const ALL: [DecisionType; 6] = [
        DecisionType::Planning,
        DecisionType::Sequencing,
        DecisionType::Recovery,
        DecisionType::Clarification,
        DecisionType::ContextAwareness,
        DecisionType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Planning => "planning",
            DecisionType::Sequencing => "sequencing",
            DecisionType::Recovery => "recovery",
            DecisionType::Clarification => "clarification",
            DecisionType::ContextAwareness => "context_awareness",
            DecisionType::General => "general",
        }
    }

    /// Types whose actions are worth surfacing as reusable patterns
    pub fn yields_patterns(&self) -> bool {
        matches!(self, DecisionType::Planning | DecisionType::Sequencing)
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DecisionType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown decision type: {}", s))
    }
}

/// One reasoning-to-action step extracted from a session transcript.
///
/// Created once by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    /// `<session_id>#<sequence>`, zero-padded so ids sort in session order
    pub id: String,
    pub session_id: String,
    pub sequence: usize,
    pub timestamp: DateTime<Utc>,
    pub decision_type: DecisionType,
    /// Display-only truncation of the reasoning text
    pub summary: String,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub action: String,
    #[serde(default)]
    pub associated_tools: Vec<String>,
    /// Reasoning text was shorter than the configured signal threshold
    #[serde(default)]
    pub low_signal: bool,
}

impl DecisionTrace {
    pub fn make_id(session_id: &str, sequence: usize) -> String {
        format!("{}#{:05}", session_id, sequence)
    }

    /// Text that feeds keyword postings: context, reasoning and action
    pub fn keyword_text(&self) -> String {
        let mut text = self.context.clone();
        if let Some(reasoning) = &self.reasoning {
            text.push(' ');
            text.push_str(reasoning);
        }
        text.push(' ');
        text.push_str(&self.action);
        text
    }

    /// The sentence worth reusing as a pattern: reasoning when present, else the action
    pub fn pattern_text(&self) -> &str {
        match &self.reasoning {
            Some(r) if !r.trim().is_empty() => r,
            _ => &self.action,
        }
    }
}

/// One session's traces, in extraction order: the unit of aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTraces {
    pub session_id: String,
    #[serde(default)]
    pub project: Option<String>,
    pub traces: Vec<DecisionTrace>,
}

impl SessionTraces {
    pub fn new(session_id: impl Into<String>, traces: Vec<DecisionTrace>) -> Self {
        Self {
            session_id: session_id.into(),
            project: None,
            traces,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> DecisionTrace {
        DecisionTrace {
            id: DecisionTrace::make_id("sess", 3),
            session_id: "sess".to_string(),
            sequence: 3,
            timestamp: "2025-01-01T00:00:00Z".parse().unwrap(),
            decision_type: DecisionType::Recovery,
            summary: "The build failed.".to_string(),
            context: "The build failed.".to_string(),
            reasoning: None,
            action: "Let me check the error output.".to_string(),
            associated_tools: vec!["Read".to_string()],
            low_signal: true,
        }
    }

    #[test]
    fn test_make_id_sorts_by_sequence() {
        assert!(DecisionTrace::make_id("s", 9) < DecisionTrace::make_id("s", 10));
        assert_eq!(DecisionTrace::make_id("abc", 7), "abc#00007");
    }

    #[test]
    fn test_decision_type_str_roundtrip() {
        for t in DecisionType::ALL {
            assert_eq!(t.as_str().parse::<DecisionType>().unwrap(), t);
        }
        assert!("diagnosis".parse::<DecisionType>().is_err());
    }

    #[test]
    fn test_decision_type_serializes_snake_case() {
        let json = serde_json::to_string(&DecisionType::ContextAwareness).unwrap();
        assert_eq!(json, "\"context_awareness\"");
    }

    #[test]
    fn test_keyword_text_includes_all_parts() {
        let mut trace = sample_trace();
        trace.reasoning = Some("since the types changed".to_string());
        let text = trace.keyword_text();
        assert!(text.contains("build failed"));
        assert!(text.contains("types changed"));
        assert!(text.contains("error output"));
    }

    #[test]
    fn test_pattern_text_prefers_reasoning() {
        let mut trace = sample_trace();
        assert_eq!(trace.pattern_text(), "Let me check the error output.");
        trace.reasoning = Some("Because the cache is stale.".to_string());
        assert_eq!(trace.pattern_text(), "Because the cache is stale.");
    }

    #[test]
    fn test_trace_backwards_compatible() {
        let json = r#"{"id":"s#00000","session_id":"s","sequence":0,"timestamp":"2025-01-01T00:00:00Z","decision_type":"general","summary":"x","context":"x","action":"x"}"#;
        let trace: DecisionTrace = serde_json::from_str(json).unwrap();
        assert!(trace.associated_tools.is_empty());
        assert!(trace.reasoning.is_none());
        assert!(!trace.low_signal);
    }
}
