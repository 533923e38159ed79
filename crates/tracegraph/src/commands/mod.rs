pub mod analyze;
pub mod extract;
pub mod project;
pub mod report;
pub mod version;

use std::path::{Path, PathBuf};
use tracegraph_core::Config;
use tracegraph_extract::TraceExtractor;
use tracegraph_index::{aggregate, TraceIndex};
use tracegraph_transcript::{discover_sessions, Paths};

/// An aggregated index plus the batch counters worth reporting
pub(crate) struct Corpus {
    pub index: TraceIndex,
    pub discovered: usize,
    pub failures: usize,
    pub malformed_records: usize,
}

pub(crate) fn load_config(paths: &Paths) -> Config {
    Config::load(&paths.config_file())
}

pub(crate) fn transcripts_dir(paths: &Paths, explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(dir) => PathBuf::from(dir),
        None => paths.projects_dir(),
    }
}

/// Discover, extract and aggregate the `limit` most recent sessions in `dir`
pub(crate) fn build_corpus(dir: &Path, limit: usize, config: &Config) -> anyhow::Result<Corpus> {
    let sources = discover_sessions(dir, limit);
    if sources.is_empty() {
        tracing::warn!(dir = %dir.display(), "no transcripts found");
    }

    let extractor = TraceExtractor::new(config)?;
    let batch = extractor.extract_batch(&sources);
    for (path, error) in &batch.failures {
        eprintln!("Skipped {}: {}", path.display(), error);
    }

    let failures = batch.failures.len();
    let malformed_records = batch.malformed_records();
    let sessions = batch.into_sessions();
    let index = aggregate(&sessions);

    Ok(Corpus {
        index,
        discovered: sources.len(),
        failures,
        malformed_records,
    })
}
