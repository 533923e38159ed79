//! Projection output and its prompt rendering

use serde::{Deserialize, Serialize};
use tracegraph_core::{truncate_chars, DecisionTrace};

const RENDERED_REASONING_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarDecision {
    pub trace: DecisionTrace,
    /// Query keywords shared with the trace
    pub match_score: usize,
    /// Ranked up as a recovery precedent for an error query
    pub boosted: bool,
}

/// What history has to say about the task at hand. Built per query, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedContext {
    pub similar_decisions: Vec<SimilarDecision>,
    pub applicable_patterns: Vec<String>,
    pub warnings: Vec<String>,
    pub suggested_tools: Vec<String>,
    /// 0 with no matches; 1 only when the match is saturated
    pub relevance_score: f64,
}

impl ProjectedContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.similar_decisions.is_empty()
            && self.applicable_patterns.is_empty()
            && self.warnings.is_empty()
            && self.suggested_tools.is_empty()
    }

    /// Markdown block suitable for injecting into a prompt
    pub fn to_prompt_context(&self) -> String {
        let mut lines = vec!["## Relevant Context from History".to_string(), String::new()];

        if !self.similar_decisions.is_empty() {
            lines.push("### Similar Past Decisions".to_string());
            for (i, similar) in self.similar_decisions.iter().enumerate() {
                let trace = &similar.trace;
                lines.push(format!("{}. [{}] {}", i + 1, trace.decision_type, trace.summary));
                if let Some(reasoning) = &trace.reasoning {
                    lines.push(format!(
                        "   Reasoning: {}",
                        truncate_chars(reasoning, RENDERED_REASONING_CHARS)
                    ));
                }
            }
            lines.push(String::new());
        }

        if !self.applicable_patterns.is_empty() {
            lines.push("### Patterns That Apply".to_string());
            for pattern in &self.applicable_patterns {
                lines.push(format!("- {}", pattern));
            }
            lines.push(String::new());
        }

        if !self.warnings.is_empty() {
            lines.push("### Warnings from History".to_string());
            for warning in &self.warnings {
                lines.push(format!("- {}", warning));
            }
            lines.push(String::new());
        }

        if !self.suggested_tools.is_empty() {
            lines.push(format!(
                "### Suggested Tools: {}",
                self.suggested_tools.join(", ")
            ));
        }

        lines.join("\n")
    }
}
