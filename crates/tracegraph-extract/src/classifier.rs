//! Ordered-rule decision classification

use regex::Regex;
use std::sync::OnceLock;
use tracegraph_core::DecisionType;

struct DecisionRule {
    decision_type: DecisionType,
    patterns: &'static [&'static str],
}

/// Evaluated top to bottom, first match wins. Recovery sits above planning so
/// "let me fix the failing test" is not filed as planning.
const DECISION_RULES: &[DecisionRule] = &[
    DecisionRule {
        decision_type: DecisionType::Recovery,
        patterns: &[
            r"\b(fail|fails|failed|failing|failure|error|errors|exception|crash|crashed|crashing|broken|panic|panicked)\b",
            r"\b(didn't|doesn't|did not|does not|isn't|wasn't|won't) work",
            r"\blet me try (a different|another|again|something else)",
            r"\bworkaround\b",
            r"\blooking at the (issue|problem)",
            r"\b(an|the|this) issue\b",
            r"\bthe (reason|cause) (is|was|seems)",
            r"\bthis (happens|happened|broke) because",
        ],
    },
    DecisionRule {
        decision_type: DecisionType::Clarification,
        patterns: &[
            r"\bthe user (wants|is asking|asked|means|meant)",
            r"\b(should i|do they want|does the user want)\b",
            r"\b(unclear|ambiguous|not sure)\b",
        ],
    },
    DecisionRule {
        decision_type: DecisionType::Planning,
        patterns: &[
            r"\blet me (break down|break this down|plan|start|set up|create|outline)",
            r"\b(first|before|to begin),? (i should|let me|i need to|i'll)",
            r"\bthis (requires|needs|involves) (multiple|several)",
            r"\b(the|my) plan (is|will)",
        ],
    },
    DecisionRule {
        decision_type: DecisionType::ContextAwareness,
        patterns: &[
            r"\b(we're|i'm|we are|i am) (already|currently|now)\b",
            r"\b(the current|existing) (state|branch|file|directory|code)",
            r"\b(remember|note) that\b",
        ],
    },
    DecisionRule {
        decision_type: DecisionType::Sequencing,
        patterns: &[
            r"\b(then|next|after that|afterwards|finally)\b",
            r"\bi need to .+ (before|first)\b",
            r"\b(already|now|done)\b.+\b(move on|proceed|continue)\b",
        ],
    },
];

static COMPILED_RULES: OnceLock<Vec<(DecisionType, Vec<Regex>)>> = OnceLock::new();

fn compiled_rules() -> &'static [(DecisionType, Vec<Regex>)] {
    COMPILED_RULES.get_or_init(|| {
        DECISION_RULES
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("decision rule pattern is valid"))
                    .collect();
                (rule.decision_type, patterns)
            })
            .collect()
    })
}

/// Assign exactly one decision type to a reasoning segment.
///
/// Total and deterministic: unmatched (or empty) text is `General`.
pub fn classify(text: &str) -> DecisionType {
    let lower = text.to_lowercase();
    compiled_rules()
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(&lower)))
        .map(|(decision_type, _)| *decision_type)
        .unwrap_or(DecisionType::General)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TraceClassifier;

impl TraceClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> DecisionType {
        classify(text)
    }
}
