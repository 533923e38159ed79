//! The aggregated, immutable trace index and its snapshot format

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracegraph_core::{DecisionTrace, DecisionType, Result, TraceError};

/// Per-session rollup kept for reporting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub project: Option<String>,
    pub trace_count: usize,
    pub decision_types: BTreeMap<String, usize>,
    pub tools_used: BTreeMap<String, usize>,
    pub recovery_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub sessions: usize,
    pub traces: usize,
    pub keywords: usize,
    pub tools: usize,
    pub recovery_patterns: usize,
    pub projects: usize,
}

/// Cross-session index. Built by [`crate::SessionAggregator`], read-only afterwards.
///
/// Ordered maps throughout so that serialized snapshots are byte-identical
/// for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceIndex {
    /// Every aggregated trace, keyed by trace id
    pub(crate) traces: BTreeMap<String, DecisionTrace>,
    pub(crate) keyword_postings: BTreeMap<String, BTreeSet<String>>,
    pub(crate) decision_type_counts: BTreeMap<String, usize>,
    pub(crate) tool_counts: BTreeMap<String, usize>,
    /// tool -> co-occurring tool -> traces where both appear
    pub(crate) tool_cooccurrence: BTreeMap<String, BTreeMap<String, usize>>,
    /// "A → B" -> times B directly followed A in a trace's tools
    #[serde(default)]
    pub(crate) tool_sequences: BTreeMap<String, usize>,
    /// Recovery trace ids in aggregation order
    pub(crate) recovery_catalogue: Vec<String>,
    #[serde(default)]
    pub(crate) sessions: Vec<SessionSummary>,
    #[serde(default)]
    pub(crate) projects: BTreeSet<String>,
}

impl TraceIndex {
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keyword_postings.len()
    }

    /// True when nothing has been aggregated into this index
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn trace(&self, id: &str) -> Option<&DecisionTrace> {
        self.traces.get(id)
    }

    pub fn postings(&self, keyword: &str) -> Option<&BTreeSet<String>> {
        self.keyword_postings.get(keyword)
    }

    pub fn keyword_postings(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.keyword_postings
    }

    pub fn decision_type_count(&self, decision_type: DecisionType) -> usize {
        self.decision_type_counts
            .get(decision_type.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Decision types by descending count, ties broken by name
    pub fn decision_type_distribution(&self) -> Vec<(String, usize)> {
        sorted_desc(&self.decision_type_counts)
    }

    pub fn tool_count(&self, tool: &str) -> usize {
        self.tool_counts.get(tool).copied().unwrap_or(0)
    }

    pub fn tool_counts(&self) -> &BTreeMap<String, usize> {
        &self.tool_counts
    }

    pub fn top_tools(&self, limit: usize) -> Vec<(String, usize)> {
        let mut tools = sorted_desc(&self.tool_counts);
        tools.truncate(limit);
        tools
    }

    pub fn cooccurrence(&self, a: &str, b: &str) -> usize {
        self.tool_cooccurrence
            .get(a)
            .and_then(|partners| partners.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Tools that co-occurred with `tool`, strongest first
    pub fn cooccurring(&self, tool: &str) -> Vec<(String, usize)> {
        self.tool_cooccurrence
            .get(tool)
            .map(sorted_desc)
            .unwrap_or_default()
    }

    pub fn top_tool_sequences(&self, limit: usize) -> Vec<(String, usize)> {
        let mut sequences = sorted_desc(&self.tool_sequences);
        sequences.truncate(limit);
        sequences
    }

    pub fn recovery_catalogue(&self) -> &[String] {
        &self.recovery_catalogue
    }

    /// Recovery traces in aggregation order
    pub fn recovery_traces(&self) -> impl Iterator<Item = &DecisionTrace> {
        self.recovery_catalogue
            .iter()
            .filter_map(|id| self.traces.get(id))
    }

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn projects(&self) -> &BTreeSet<String> {
        &self.projects
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            sessions: self.session_count(),
            traces: self.trace_count(),
            keywords: self.keyword_count(),
            tools: self.tool_counts.len(),
            recovery_patterns: self.recovery_catalogue.len(),
            projects: self.projects.len(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        tracegraph_transcript::atomic_write(path, json.as_bytes())?;
        tracing::info!(path = %path.display(), traces = self.trace_count(), "saved index snapshot");
        Ok(())
    }

    /// Load a cached snapshot. A missing snapshot means no index is available.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TraceError::IndexUnavailable);
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn sorted_desc(counts: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts
        .iter()
        .map(|(key, &count)| (key.clone(), count))
        .collect();
    // BTreeMap iteration is already name-ordered; stable sort keeps it for ties
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.1));
    entries
}
