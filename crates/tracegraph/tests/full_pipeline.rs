mod common;

use common::{commit_session, recovery_session, TranscriptBuilder};
use tempfile::TempDir;
use tracegraph_core::{Config, DecisionType, TraceError};
use tracegraph_extract::TraceExtractor;
use tracegraph_index::{aggregate, TraceIndex};
use tracegraph_project::{ProjectionFunction, Query};
use tracegraph_transcript::{discover_sessions, SessionSource};

fn corpus_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("-home-dev-tracegraph");
    std::fs::create_dir_all(&project).unwrap();
    commit_session().write_to(&project, "commit.jsonl");
    recovery_session().write_to(&project, "recovery.jsonl");
    TranscriptBuilder::new()
        .thinking(0, "Subagent chatter.")
        .write_to(&project, "agent-123.jsonl");
    dir
}

fn build_index(dir: &TempDir) -> TraceIndex {
    let sources = discover_sessions(dir.path(), 10);
    let batch = TraceExtractor::default().extract_batch(&sources);
    assert!(batch.failures.is_empty());
    aggregate(&batch.into_sessions())
}

#[test]
fn test_extract_recovery_scenario() {
    let content = TranscriptBuilder::new()
        .thinking(0, "The build failed with a type error. Let me check the error output.")
        .tool(10, "Read")
        .build();
    let extraction = TraceExtractor::default().extract_str("s1", &content);

    assert_eq!(extraction.trace_count(), 1);
    let trace = &extraction.session.traces[0];
    assert_eq!(trace.decision_type, DecisionType::Recovery);
    assert_eq!(trace.associated_tools, vec!["Read".to_string()]);
}

#[test]
fn test_malformed_lines_are_counted_not_fatal() {
    let content = commit_session().raw("{not json").raw("").build();
    let extraction = TraceExtractor::default().extract_str("s1", &content);
    assert_eq!(extraction.malformed_records, 1);
    assert_eq!(extraction.trace_count(), 1);
}

#[test]
fn test_discovery_skips_agent_transcripts() {
    let dir = corpus_dir();
    let sources = discover_sessions(dir.path(), 10);
    let ids: Vec<&str> = sources.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(sources.len(), 2);
    assert!(!ids.contains(&"agent-123"));
    assert!(sources.iter().all(|s| s.project == "tracegraph"));
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = corpus_dir();
    let index = build_index(&dir);

    assert_eq!(index.session_count(), 2);
    assert_eq!(index.trace_count(), 3);
    assert_eq!(index.decision_type_count(DecisionType::Recovery), 1);
    assert_eq!(index.cooccurrence("Read", "Edit"), 1);
    assert!(index.projects().contains("tracegraph"));

    let context = ProjectionFunction::default()
        .project(&index, &Query::new("I want to commit my changes"))
        .unwrap();
    assert_eq!(context.similar_decisions[0].trace.session_id, "commit");
    assert!(context.suggested_tools.contains(&"Bash".to_string()));
    assert!(context.relevance_score > 0.0);
    assert!(context.to_prompt_context().contains("### Similar Past Decisions"));
}

#[test]
fn test_error_query_surfaces_recovery() {
    let dir = corpus_dir();
    let index = build_index(&dir);

    let query = Query::new("fix the build").with_error("type error in build");
    let context = ProjectionFunction::default().project(&index, &query).unwrap();

    let first = &context.similar_decisions[0];
    assert!(first.boosted);
    assert_eq!(first.trace.decision_type, DecisionType::Recovery);
}

#[test]
fn test_unreadable_transcript_is_reported() {
    let dir = corpus_dir();
    let mut sources = discover_sessions(dir.path(), 10);
    sources.push(SessionSource::from_path(&dir.path().join("missing.jsonl")));

    let batch = TraceExtractor::default().extract_batch(&sources);
    assert_eq!(batch.sessions.len(), 2);
    assert_eq!(batch.failures.len(), 1);
    assert!(matches!(
        batch.failures[0].1,
        TraceError::TranscriptUnreadable { .. }
    ));
}

#[test]
fn test_extraction_is_deterministic() {
    let dir = corpus_dir();
    let first = build_index(&dir).to_json().unwrap();
    let second = build_index(&dir).to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_roundtrip_answers_same_queries() {
    let dir = corpus_dir();
    let index = build_index(&dir);
    let snapshot = dir.path().join("index.json");
    index.save(&snapshot).unwrap();
    let loaded = TraceIndex::load(&snapshot).unwrap();
    assert_eq!(loaded, index);

    let query = Query::new("schema migration");
    let projection = ProjectionFunction::default();
    assert_eq!(
        projection.project(&index, &query).unwrap(),
        projection.project(&loaded, &query).unwrap()
    );
}

#[test]
fn test_empty_corpus_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let index = build_index(&dir);
    assert_eq!(index.session_count(), 0);
    let result = ProjectionFunction::default().project(&index, &Query::new("commit"));
    assert!(matches!(result, Err(TraceError::IndexUnavailable)));
}

#[test]
fn test_invalid_window_rejected() {
    let config = Config {
        association_window_secs: 0,
        ..Config::default()
    };
    assert!(matches!(
        TraceExtractor::new(&config),
        Err(TraceError::InvalidWindow(0))
    ));
}
