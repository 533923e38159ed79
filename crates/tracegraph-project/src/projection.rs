//! Ranking historical decisions against a task description

use crate::context::{ProjectedContext, SimilarDecision};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracegraph_core::{
    jaccard_similarity, normalize_text, truncate_chars, unique_keywords, Config, DecisionTrace,
    DecisionType, Result, TraceError,
};
use tracegraph_index::TraceIndex;

/// Raw match count at which relevance saturates regardless of other signals
const SATURATION_MATCHES: usize = 5;
/// Candidate count at which the coverage term saturates
const COVERAGE_SATURATION: usize = 5;
/// Ceiling for any score that has not saturated
const UNSATURATED_CAP: f64 = 0.95;
const OVERLAP_WEIGHT: f64 = 0.55;
const COVERAGE_WEIGHT: f64 = 0.25;
const BOOST_WEIGHT: f64 = 0.20;

/// Weight of a tool appearing directly on a similar decision
const DIRECT_TOOL_WEIGHT: usize = 2;
/// Co-occurrence partners considered per implied tool
const PARTNERS_PER_TOOL: usize = 3;
const WARNING_SUMMARY_CHARS: usize = 60;

/// A description of the current situation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub task_text: String,
    pub error_text: Option<String>,
    /// Tools the caller is already considering; never suggested back
    pub considered_tools: Vec<String>,
}

impl Query {
    pub fn new(task_text: impl Into<String>) -> Self {
        Self {
            task_text: task_text.into(),
            ..Default::default()
        }
    }

    pub fn with_error(mut self, error_text: impl Into<String>) -> Self {
        self.error_text = Some(error_text.into());
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.considered_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    fn has_error(&self) -> bool {
        self.error_text
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty())
    }

    /// Task and error text through the same normalization as aggregation
    fn keywords(&self) -> Vec<String> {
        let mut text = self.task_text.clone();
        if let Some(error) = &self.error_text {
            text.push(' ');
            text.push_str(error);
        }
        unique_keywords(&text)
    }
}

struct Candidate<'a> {
    trace: &'a DecisionTrace,
    matches: usize,
    boosted: bool,
}

/// Boosted first, then more shared keywords, then full-signal over
/// low-signal, then more recent, then the earlier id.
fn rank(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.boosted
        .cmp(&a.boosted)
        .then_with(|| b.matches.cmp(&a.matches))
        .then_with(|| a.trace.low_signal.cmp(&b.trace.low_signal))
        .then_with(|| b.trace.timestamp.cmp(&a.trace.timestamp))
        .then_with(|| a.trace.id.cmp(&b.trace.id))
}

/// Stateless query over an immutable [`TraceIndex`]
#[derive(Debug, Clone)]
pub struct ProjectionFunction {
    top_k: usize,
    max_patterns: usize,
    max_tools: usize,
    max_warnings: usize,
    warning_similarity: f64,
}

impl ProjectionFunction {
    pub fn new(config: &Config) -> Self {
        Self {
            top_k: config.top_k,
            max_patterns: config.max_patterns,
            max_tools: config.max_tools,
            max_warnings: config.max_warnings,
            warning_similarity: config.warning_similarity,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Project the index onto `query`.
    ///
    /// Fails with [`TraceError::IndexUnavailable`] when nothing has been
    /// aggregated. A query without usable keywords yields an empty context.
    pub fn project(&self, index: &TraceIndex, query: &Query) -> Result<ProjectedContext> {
        if index.is_empty() {
            return Err(TraceError::IndexUnavailable);
        }

        let keywords = query.keywords();
        if keywords.is_empty() {
            tracing::debug!("query has no usable keywords");
            return Ok(ProjectedContext::empty());
        }

        let candidates = self.rank_candidates(index, query, &keywords);
        let relevance_score = relevance_score(keywords.len(), &candidates);

        let similar: Vec<&Candidate<'_>> = candidates.iter().take(self.top_k).collect();
        let context = ProjectedContext {
            applicable_patterns: self.applicable_patterns(&similar),
            suggested_tools: self.suggested_tools(index, query, &similar),
            warnings: self.warnings(index, query),
            similar_decisions: similar
                .iter()
                .map(|c| SimilarDecision {
                    trace: c.trace.clone(),
                    match_score: c.matches,
                    boosted: c.boosted,
                })
                .collect(),
            relevance_score,
        };

        tracing::debug!(
            keywords = keywords.len(),
            candidates = candidates.len(),
            relevance = context.relevance_score,
            "projected query"
        );
        Ok(context)
    }

    fn rank_candidates<'a>(
        &self,
        index: &'a TraceIndex,
        query: &Query,
        keywords: &[String],
    ) -> Vec<Candidate<'a>> {
        let mut matches: HashMap<&'a str, usize> = HashMap::new();
        for keyword in keywords {
            if let Some(ids) = index.postings(keyword) {
                for id in ids {
                    *matches.entry(id.as_str()).or_insert(0) += 1;
                }
            }
        }

        let boost_recovery = query.has_error();
        let mut candidates: Vec<Candidate<'a>> = matches
            .into_iter()
            .filter_map(|(id, count)| {
                let trace = index.trace(id)?;
                Some(Candidate {
                    trace,
                    matches: count,
                    boosted: boost_recovery && trace.decision_type == DecisionType::Recovery,
                })
            })
            .collect();

        candidates.sort_by(rank);
        candidates
    }

    fn applicable_patterns(&self, similar: &[&Candidate<'_>]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for candidate in similar {
            if patterns.len() >= self.max_patterns {
                break;
            }
            if !candidate.trace.decision_type.yields_patterns() {
                continue;
            }
            let text = candidate.trace.pattern_text().trim();
            if text.is_empty() {
                continue;
            }
            if seen.insert(normalize_text(text)) {
                patterns.push(text.to_string());
            }
        }

        patterns
    }

    /// Tools from the similar decisions plus the strongest co-occurrence
    /// partners of every implied tool, minus what the caller already has.
    fn suggested_tools(
        &self,
        index: &TraceIndex,
        query: &Query,
        similar: &[&Candidate<'_>],
    ) -> Vec<String> {
        let mut scores: BTreeMap<String, usize> = BTreeMap::new();
        let mut implied: Vec<&str> = query.considered_tools.iter().map(|t| t.as_str()).collect();

        for candidate in similar {
            for tool in &candidate.trace.associated_tools {
                *scores.entry(tool.clone()).or_insert(0) += DIRECT_TOOL_WEIGHT;
                if !implied.contains(&tool.as_str()) {
                    implied.push(tool.as_str());
                }
            }
        }

        for tool in implied {
            for (partner, count) in index.cooccurring(tool).into_iter().take(PARTNERS_PER_TOOL) {
                *scores.entry(partner).or_insert(0) += count;
            }
        }

        let mut ranked: Vec<(String, usize)> = scores
            .into_iter()
            .filter(|(tool, _)| !query.considered_tools.contains(tool))
            .collect();
        ranked.sort_by_key(|entry| std::cmp::Reverse(entry.1));
        ranked
            .into_iter()
            .take(self.max_tools)
            .map(|(tool, _)| tool)
            .collect()
    }

    /// Past recoveries whose context resembles the task
    fn warnings(&self, index: &TraceIndex, query: &Query) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut warnings = Vec::new();

        for trace in index.recovery_traces() {
            if warnings.len() >= self.max_warnings {
                break;
            }
            if jaccard_similarity(&query.task_text, &trace.context) <= self.warning_similarity {
                continue;
            }
            let warning = format!(
                "Similar task failed before: {}",
                truncate_chars(&trace.summary, WARNING_SUMMARY_CHARS)
            );
            if seen.insert(warning.clone()) {
                warnings.push(warning);
            }
        }

        warnings
    }
}

impl Default for ProjectionFunction {
    fn default() -> Self {
        Self::new(&Config::new())
    }
}

/// Bounded confidence that the retrieved context is useful.
///
/// Zero without candidates. Reaches 1.0 only when saturated: a raw match
/// count of [`SATURATION_MATCHES`], or a boosted trace matching every query
/// keyword (at least two). Otherwise a weighted blend of keyword overlap,
/// candidate coverage and boost, capped below 1.
fn relevance_score(query_keywords: usize, candidates: &[Candidate<'_>]) -> f64 {
    if candidates.is_empty() || query_keywords == 0 {
        return 0.0;
    }

    let best = candidates.iter().map(|c| c.matches).max().unwrap_or(0);
    let boosted = candidates.iter().any(|c| c.boosted);
    let exact_boosted = candidates
        .iter()
        .any(|c| c.boosted && c.matches >= 2 && c.matches == query_keywords);

    if best >= SATURATION_MATCHES || exact_boosted {
        return 1.0;
    }

    let overlap = best as f64 / query_keywords as f64;
    let coverage = candidates.len().min(COVERAGE_SATURATION) as f64 / COVERAGE_SATURATION as f64;
    let boost = if boosted { 1.0 } else { 0.0 };

    let score = OVERLAP_WEIGHT * overlap + COVERAGE_WEIGHT * coverage + BOOST_WEIGHT * boost;
    score.clamp(0.0, UNSATURATED_CAP)
}
