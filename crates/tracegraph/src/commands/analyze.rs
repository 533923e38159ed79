use super::report::build_report;
use serde::Serialize;
use tracegraph_index::{IndexStats, SessionSummary, TraceIndex};
use tracegraph_transcript::Paths;

#[derive(Serialize)]
struct AnalysisSummary<'a> {
    stats: IndexStats,
    decision_types: Vec<(String, usize)>,
    top_tools: Vec<(String, usize)>,
    tool_sequences: Vec<(String, usize)>,
    sessions: &'a [SessionSummary],
}

impl<'a> AnalysisSummary<'a> {
    fn from_index(index: &'a TraceIndex) -> Self {
        Self {
            stats: index.stats(),
            decision_types: index.decision_type_distribution(),
            top_tools: index.top_tools(15),
            tool_sequences: index.top_tool_sequences(10),
            sessions: index.sessions(),
        }
    }
}

pub fn run(transcripts: Option<&str>, sample: Option<usize>, json: bool, save: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = super::load_config(&paths);
    let dir = super::transcripts_dir(&paths, transcripts);
    let limit = sample.unwrap_or(config.session_limit);

    eprintln!("Analyzing up to {} sessions from {}", limit, dir.display());
    let corpus = super::build_corpus(&dir, limit, &config)?;
    eprintln!(
        "Found {} sessions: {} aggregated, {} unreadable, {} malformed records skipped",
        corpus.discovered,
        corpus.index.session_count(),
        corpus.failures,
        corpus.malformed_records
    );

    if save {
        let snapshot = paths.index_snapshot();
        corpus.index.save(&snapshot)?;
        eprintln!("Index saved to {}", snapshot.display());
    }

    if json {
        let summary = AnalysisSummary::from_index(&corpus.index);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", build_report(&corpus.index));
    }
    Ok(())
}
