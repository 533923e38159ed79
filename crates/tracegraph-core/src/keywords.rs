//! Keyword normalization shared by aggregation and projection

use std::collections::HashSet;

const MIN_KEYWORD_CHARS: usize = 3;

static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "to", "of",
    "in", "for", "on", "with", "at", "by", "from", "as", "into", "through", "then", "here",
    "there", "when", "where", "why", "how", "all", "each", "every", "both", "few", "more", "most",
    "some", "such", "not", "only", "just", "but", "and", "or", "if", "about", "what", "which",
    "who", "this", "that", "these", "those", "it", "its", "my", "me", "we", "our", "you", "your",
    "they", "them", "their", "up", "down", "no", "so", "very", "too", "than", "please", "want",
    "like", "think", "know", "see", "look", "let", "need", "needs", "going", "now", "also",
    "still", "already", "done", "good", "right", "sure", "yes", "okay", "thanks", "thank", "i'll",
    "i'm", "we're", "don't", "didn", "doesn", "isn", "wasn", "let's", "check", "first", "next",
    "one", "any", "out", "get", "got", "use", "using", "make", "other", "after", "before",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercase, strip punctuation, drop stop words and words shorter than three characters.
///
/// Aggregation and projection must both go through this function, otherwise
/// postings lookups miss.
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| w.chars().count() >= MIN_KEYWORD_CHARS && !is_stop_word(w))
        .map(|w| w.to_string())
        .collect()
}

/// Keywords deduplicated, first-seen order preserved
pub fn unique_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_keywords(text)
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Lowercased with whitespace collapsed, used for deduplicating display text
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// At most `max_chars` characters, the last three replaced by `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Jaccard similarity of the two texts' keyword sets
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = extract_keywords(a).into_iter().collect();
    let set_b: HashSet<String> = extract_keywords(b).into_iter().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}
