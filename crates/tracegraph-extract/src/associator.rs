//! Time-windowed association of reasoning segments with later tool calls

use chrono::{DateTime, Duration, Utc};
use tracegraph_core::{Result, TraceError};
use tracegraph_transcript::ToolInvocation;

/// Links a reasoning timestamp `t` to tools invoked within `[t, t + window]`.
///
/// Calls before `t` are never linked. One call may back several traces.
#[derive(Debug, Clone, Copy)]
pub struct ToolAssociator {
    window: Duration,
}

impl ToolAssociator {
    /// Rejects windows that are not positive or that chrono cannot represent.
    pub fn new(window_secs: i64) -> Result<Self> {
        if window_secs <= 0 {
            return Err(TraceError::InvalidWindow(window_secs));
        }
        let window =
            Duration::try_seconds(window_secs).ok_or(TraceError::InvalidWindow(window_secs))?;
        Ok(Self { window })
    }

    /// Distinct tool names in first-seen order. `timeline` must be sorted by timestamp.
    ///
    /// When `at + window` overflows the calendar, every later call is in range.
    pub fn associate(&self, at: DateTime<Utc>, timeline: &[ToolInvocation]) -> Vec<String> {
        let end = at.checked_add_signed(self.window);
        let start = timeline.partition_point(|call| call.timestamp < at);

        let mut tools: Vec<String> = Vec::new();
        let in_window = |call: &&ToolInvocation| end.map_or(true, |end| call.timestamp <= end);
        for call in timeline[start..].iter().take_while(in_window) {
            if !tools.contains(&call.name) {
                tools.push(call.name.clone());
            }
        }
        tools
    }
}

impl Default for ToolAssociator {
    fn default() -> Self {
        Self {
            window: Duration::seconds(60),
        }
    }
}
