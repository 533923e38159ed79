//! Transcript → ordered decision traces

use crate::associator::ToolAssociator;
use crate::classifier::TraceClassifier;
use crate::segment::{segment, summarize};
use std::path::PathBuf;
use tracegraph_core::{Config, DecisionTrace, Result, SessionTraces, TraceError};
use tracegraph_transcript::{read_transcript, SessionSource, Transcript};

/// Traces from one transcript plus the parse counters reported to the user
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub session: SessionTraces,
    pub total_records: usize,
    pub malformed_records: usize,
    /// Reasoning segments with no text, which yield no trace
    pub empty_segments: usize,
}

impl Extraction {
    pub fn trace_count(&self) -> usize {
        self.session.traces.len()
    }
}

/// Result of extracting many transcripts. Failures never abort the batch.
#[derive(Debug, Default)]
pub struct BatchExtraction {
    /// Sorted by session id so downstream folds are scheduling-independent
    pub sessions: Vec<Extraction>,
    pub failures: Vec<(PathBuf, TraceError)>,
}

impl BatchExtraction {
    pub fn total_traces(&self) -> usize {
        self.sessions.iter().map(|e| e.trace_count()).sum()
    }

    pub fn malformed_records(&self) -> usize {
        self.sessions.iter().map(|e| e.malformed_records).sum()
    }

    pub fn into_sessions(self) -> Vec<SessionTraces> {
        self.sessions.into_iter().map(|e| e.session).collect()
    }
}

#[derive(Debug, Clone)]
pub struct TraceExtractor {
    classifier: TraceClassifier,
    associator: ToolAssociator,
    summary_chars: usize,
    min_signal_chars: usize,
}

impl TraceExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: TraceClassifier::new(),
            associator: ToolAssociator::new(config.association_window_secs)?,
            summary_chars: config.summary_chars,
            min_signal_chars: config.min_signal_chars,
        })
    }

    /// Build traces from an already-decoded transcript, preserving source order
    pub fn extract_transcript(&self, session_id: &str, transcript: &Transcript) -> Vec<DecisionTrace> {
        let mut traces = Vec::new();

        for segment_record in &transcript.reasoning {
            let text = segment_record.text.trim();
            if text.is_empty() {
                tracing::debug!(line = segment_record.line, "empty reasoning segment skipped");
                continue;
            }

            let parts = segment(text);
            let sequence = traces.len();
            traces.push(DecisionTrace {
                id: DecisionTrace::make_id(session_id, sequence),
                session_id: session_id.to_string(),
                sequence,
                timestamp: segment_record.timestamp,
                decision_type: self.classifier.classify(text),
                summary: summarize(text, self.summary_chars),
                context: parts.context,
                reasoning: parts.reasoning,
                action: parts.action,
                associated_tools: self
                    .associator
                    .associate(segment_record.timestamp, &transcript.tool_calls),
                low_signal: text.chars().count() < self.min_signal_chars,
            });
        }

        traces
    }

    fn extraction_from(&self, session_id: &str, transcript: &Transcript) -> Extraction {
        let traces = self.extract_transcript(session_id, transcript);
        let empty_segments = transcript.reasoning.len() - traces.len();
        Extraction {
            session: SessionTraces::new(session_id, traces),
            total_records: transcript.total_records,
            malformed_records: transcript.malformed_records,
            empty_segments,
        }
    }

    /// Extract from JSONL text already in memory
    pub fn extract_str(&self, session_id: &str, content: &str) -> Extraction {
        let transcript = tracegraph_transcript::parse_transcript(content);
        self.extraction_from(session_id, &transcript)
    }

    /// Extract one transcript file. Errors only if the file is unreadable.
    pub fn extract_source(&self, source: &SessionSource) -> Result<Extraction> {
        let transcript = read_transcript(&source.path)?;
        let mut extraction = self.extraction_from(&source.session_id, &transcript);
        extraction.session.project = Some(source.project.clone());

        tracing::debug!(
            session = %source.session_id,
            traces = extraction.trace_count(),
            malformed = extraction.malformed_records,
            "extracted transcript"
        );
        Ok(extraction)
    }

    /// Extract every source; unreadable transcripts are recorded and skipped
    pub fn extract_batch(&self, sources: &[SessionSource]) -> BatchExtraction {
        let mut batch = BatchExtraction::default();

        for source in sources {
            match self.extract_source(source) {
                Ok(extraction) => batch.sessions.push(extraction),
                Err(e) => {
                    tracing::warn!(path = %source.path.display(), error = %e, "skipping transcript");
                    batch.failures.push((source.path.clone(), e));
                }
            }
        }

        batch
            .sessions
            .sort_by(|a, b| a.session.session_id.cmp(&b.session.session_id));

        tracing::info!(
            sessions = batch.sessions.len(),
            failures = batch.failures.len(),
            traces = batch.total_traces(),
            "batch extraction complete"
        );
        batch
    }
}

impl Default for TraceExtractor {
    fn default() -> Self {
        let config = Config::new();
        Self {
            classifier: TraceClassifier::new(),
            associator: ToolAssociator::default(),
            summary_chars: config.summary_chars,
            min_signal_chars: config.min_signal_chars,
        }
    }
}
