//! Fold of session trace sequences into a [`TraceIndex`]

use crate::index::{SessionSummary, TraceIndex};
use std::collections::{BTreeSet, HashSet};
use tracegraph_core::{extract_keywords, DecisionTrace, DecisionType, SessionTraces};

/// Accumulates sessions into a fresh index. Each aggregator starts empty;
/// nothing is shared between runs.
#[derive(Debug, Default)]
pub struct SessionAggregator {
    index: TraceIndex,
    seen_sessions: HashSet<String>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one session in. A session id already aggregated is skipped so
    /// overlapping inputs are not double counted; returns whether it was added.
    pub fn add_session(&mut self, session: &SessionTraces) -> bool {
        if !self.seen_sessions.insert(session.session_id.clone()) {
            tracing::warn!(session = %session.session_id, "duplicate session ignored");
            return false;
        }

        let mut summary = SessionSummary {
            session_id: session.session_id.clone(),
            project: session.project.clone(),
            trace_count: session.traces.len(),
            ..Default::default()
        };

        for trace in &session.traces {
            self.observe_trace(trace);

            *summary
                .decision_types
                .entry(trace.decision_type.as_str().to_string())
                .or_insert(0) += 1;
            for tool in &trace.associated_tools {
                *summary.tools_used.entry(tool.clone()).or_insert(0) += 1;
            }
            if trace.decision_type == DecisionType::Recovery {
                summary.recovery_count += 1;
            }
        }

        if let Some(project) = &session.project {
            self.index.projects.insert(project.clone());
        }
        self.index.sessions.push(summary);
        true
    }

    fn observe_trace(&mut self, trace: &DecisionTrace) {
        let index = &mut self.index;

        let keywords: BTreeSet<String> = extract_keywords(&trace.keyword_text()).into_iter().collect();
        for keyword in keywords {
            index
                .keyword_postings
                .entry(keyword)
                .or_default()
                .insert(trace.id.clone());
        }

        *index
            .decision_type_counts
            .entry(trace.decision_type.as_str().to_string())
            .or_insert(0) += 1;

        let tools = &trace.associated_tools;
        for tool in tools {
            *index.tool_counts.entry(tool.clone()).or_insert(0) += 1;
        }

        // Co-occurrence: every pair of tools in the same trace, both directions
        for (i, a) in tools.iter().enumerate() {
            for b in tools.iter().skip(i + 1) {
                if a == b {
                    continue;
                }
                *index
                    .tool_cooccurrence
                    .entry(a.clone())
                    .or_default()
                    .entry(b.clone())
                    .or_insert(0) += 1;
                *index
                    .tool_cooccurrence
                    .entry(b.clone())
                    .or_default()
                    .entry(a.clone())
                    .or_insert(0) += 1;
            }
        }

        for pair in tools.windows(2) {
            *index
                .tool_sequences
                .entry(format!("{} → {}", pair[0], pair[1]))
                .or_insert(0) += 1;
        }

        if trace.decision_type == DecisionType::Recovery {
            index.recovery_catalogue.push(trace.id.clone());
        }

        index.traces.insert(trace.id.clone(), trace.clone());
    }

    pub fn finish(self) -> TraceIndex {
        tracing::info!(
            sessions = self.index.session_count(),
            traces = self.index.trace_count(),
            keywords = self.index.keyword_count(),
            "aggregation complete"
        );
        self.index
    }
}

/// Aggregate sessions into a fresh index, in the order given
pub fn aggregate<'a, I>(sessions: I) -> TraceIndex
where
    I: IntoIterator<Item = &'a SessionTraces>,
{
    let mut aggregator = SessionAggregator::new();
    for session in sessions {
        aggregator.add_session(session);
    }
    aggregator.finish()
}
