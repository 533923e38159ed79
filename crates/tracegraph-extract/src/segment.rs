//! Sentence-level splitting of reasoning text into context, reasoning and action

use regex::Regex;
use std::sync::OnceLock;
use tracegraph_core::truncate_chars;

static CAUSAL_RE: OnceLock<Regex> = OnceLock::new();

/// Phrases that open the concluding "what to do next" sentence
const IMPERATIVE_MARKERS: &[&str] = &[
    "let me",
    "let's",
    "i need to",
    "i'll",
    "i will",
    "i should",
    "i'm going to",
    "i am going to",
    "we need to",
    "we should",
];

/// Filler words allowed before an imperative marker ("So, let me ...")
const LEAD_INS: &[&str] = &["so", "ok", "okay", "now", "next", "then", "first", "alright", "great"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    pub context: String,
    pub reasoning: Option<String>,
    pub action: String,
}

/// Split on `.`, `!`, `?` followed by whitespace, and on line breaks
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(c);
            let at_boundary = matches!(c, '.' | '!' | '?')
                && chars.peek().map_or(true, |next| next.is_whitespace());
            if at_boundary {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                current.clear();
            }
        }
        let rest = current.trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
    }

    sentences
}

fn strip_lead_in(sentence: &str) -> &str {
    let trimmed = sentence.trim_start();
    for lead in LEAD_INS {
        if let Some(rest) = trimmed.strip_prefix(lead) {
            if rest.starts_with(',') || rest.starts_with(' ') {
                return rest.trim_start_matches(',').trim_start();
            }
        }
    }
    trimmed
}

fn is_imperative(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    let body = strip_lead_in(&lower);
    IMPERATIVE_MARKERS.iter().any(|marker| {
        body.strip_prefix(marker)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(|c: char| !c.is_alphanumeric()))
    })
}

fn is_causal(sentence: &str) -> bool {
    let re = CAUSAL_RE.get_or_init(|| {
        Regex::new(r"\b(because|since|due to|given that|so that|this means|which means|this (indicates|suggests))\b")
            .expect("causal pattern is valid")
    });
    re.is_match(&sentence.to_lowercase())
}

/// Split reasoning text into lead context, optional causal reasoning and the
/// concluding action.
///
/// The action starts at the first sentence after the lead that opens with an
/// imperative marker. Without one (or when the very first sentence is already
/// the imperative) the whole text serves as both context and action.
pub fn segment(text: &str) -> Segments {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Segments {
            context: String::new(),
            reasoning: None,
            action: String::new(),
        };
    }

    let action_start = sentences
        .iter()
        .skip(1)
        .position(|s| is_imperative(s))
        .map(|idx| idx + 1);

    let Some(k) = action_start else {
        let whole = sentences.join(" ");
        return Segments {
            context: whole.clone(),
            reasoning: None,
            action: whole,
        };
    };

    let mut context = vec![sentences[0].as_str()];
    let mut reasoning = Vec::new();
    for sentence in &sentences[1..k] {
        if is_causal(sentence) {
            reasoning.push(sentence.as_str());
        } else {
            context.push(sentence.as_str());
        }
    }

    Segments {
        context: context.join(" "),
        reasoning: if reasoning.is_empty() {
            None
        } else {
            Some(reasoning.join(" "))
        },
        action: sentences[k..].join(" "),
    }
}

/// First `max_chars` characters with whitespace collapsed, `...` marking a cut
pub fn summarize(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, max_chars)
}
