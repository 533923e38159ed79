//! Decoding transcript records into reasoning segments and tool invocations
//!
//! Two layouts are accepted:
//! - Claude Code: `{"type":"assistant","timestamp":..,"message":{"content":[blocks]}}`
//!   where blocks of type `thinking` carry reasoning and `tool_use` carry a tool name.
//! - Flat: `{"type":"thinking"|"reasoning","timestamp":..,"thinking":..}` and
//!   `{"type":"tool_use","timestamp":..,"name":..}`.
//!
//! Any other record type is ignored. Unknown fields are never rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracegraph_core::TraceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningSegment {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    /// 1-based line in the transcript
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub timestamp: DateTime<Utc>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    Reasoning(ReasoningSegment),
    ToolUse(ToolInvocation),
}

/// Decoded transcript: reasoning in source order, tool calls sorted by time
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub reasoning: Vec<ReasoningSegment>,
    pub tool_calls: Vec<ToolInvocation>,
    /// Non-blank lines seen
    pub total_records: usize,
    pub malformed_records: usize,
}

fn parse_timestamp(record: &Value) -> Option<DateTime<Utc>> {
    let raw = record.get("timestamp").and_then(|t| t.as_str())?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn reasoning_text(block: &Value) -> String {
    block
        .get("thinking")
        .or_else(|| block.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or("")
        .to_string()
}

fn tool_name(block: &Value) -> Option<String> {
    block
        .get("name")
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())
        .map(|n| n.to_string())
}

fn event_from_block(
    block: &Value,
    timestamp: DateTime<Utc>,
    line: usize,
) -> Option<TranscriptEvent> {
    match block.get("type").and_then(|t| t.as_str())? {
        "thinking" | "reasoning" => Some(TranscriptEvent::Reasoning(ReasoningSegment {
            timestamp,
            text: reasoning_text(block),
            line,
        })),
        "tool_use" => tool_name(block).map(|name| {
            TranscriptEvent::ToolUse(ToolInvocation { timestamp, name })
        }),
        _ => None,
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> TraceError {
    TraceError::MalformedRecord {
        line,
        reason: reason.into(),
    }
}

/// Decode one JSONL line. Irrelevant records decode to no events.
pub fn parse_record(raw: &str, line: usize) -> Result<Vec<TranscriptEvent>, TraceError> {
    let record: Value =
        serde_json::from_str(raw).map_err(|e| malformed(line, e.to_string()))?;
    if !record.is_object() {
        return Err(malformed(line, "record is not an object"));
    }

    let record_type = record
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| malformed(line, "missing type"))?;

    let blocks: Vec<&Value> = match record_type {
        "assistant" => match record.pointer("/message/content").and_then(|c| c.as_array()) {
            Some(content) => content.iter().collect(),
            None => return Ok(Vec::new()),
        },
        "thinking" | "reasoning" | "tool_use" => vec![&record],
        _ => return Ok(Vec::new()),
    };

    let relevant = blocks.iter().any(|b| {
        matches!(
            b.get("type").and_then(|t| t.as_str()),
            Some("thinking" | "reasoning" | "tool_use")
        )
    });
    if !relevant {
        return Ok(Vec::new());
    }

    let timestamp = parse_timestamp(&record).ok_or_else(|| malformed(line, "missing or invalid timestamp"))?;

    Ok(blocks
        .into_iter()
        .filter_map(|block| event_from_block(block, timestamp, line))
        .collect())
}

/// Decode a whole transcript, skipping and counting malformed lines
pub fn parse_transcript(content: &str) -> Transcript {
    let mut transcript = Transcript::default();

    for (idx, raw) in content.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        transcript.total_records += 1;
        let line = idx + 1;

        match parse_record(raw, line) {
            Ok(events) => {
                for event in events {
                    match event {
                        TranscriptEvent::Reasoning(segment) => transcript.reasoning.push(segment),
                        TranscriptEvent::ToolUse(call) => transcript.tool_calls.push(call),
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping record");
                transcript.malformed_records += 1;
            }
        }
    }

    // Stable: calls sharing a timestamp keep source order
    transcript.tool_calls.sort_by_key(|c| c.timestamp);
    transcript
}
