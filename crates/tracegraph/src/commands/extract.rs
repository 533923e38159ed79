use std::path::Path;
use tracegraph_core::DecisionTrace;
use tracegraph_extract::{Extraction, TraceExtractor};
use tracegraph_transcript::{Paths, SessionSource};

pub fn run(file: &str, json: bool, limit: Option<usize>) -> anyhow::Result<()> {
    let config = super::load_config(&Paths::new()?);
    let extractor = TraceExtractor::new(&config)?;
    let source = SessionSource::from_path(Path::new(file));
    let extraction = extractor.extract_source(&source)?;

    let shown = limit.unwrap_or(usize::MAX);
    if json {
        let traces: Vec<&DecisionTrace> = extraction.session.traces.iter().take(shown).collect();
        println!("{}", serde_json::to_string_pretty(&traces)?);
    } else {
        println!("{}", render_extraction(&extraction, shown));
    }
    Ok(())
}

fn render_extraction(extraction: &Extraction, shown: usize) -> String {
    let session = &extraction.session;
    let mut lines = vec![
        format!("Session: {}", session.session_id),
        format!(
            "Records: {} ({} malformed) | Traces: {} ({} empty segments skipped)",
            extraction.total_records,
            extraction.malformed_records,
            extraction.trace_count(),
            extraction.empty_segments
        ),
        String::new(),
    ];

    for trace in session.traces.iter().take(shown) {
        lines.push(format!(
            "[{}] {} {}",
            trace.decision_type,
            trace.timestamp.format("%H:%M:%S"),
            trace.summary
        ));
        if let Some(reasoning) = &trace.reasoning {
            lines.push(format!("    why: {}", reasoning));
        }
        lines.push(format!("    action: {}", trace.action));
        if !trace.associated_tools.is_empty() {
            lines.push(format!("    tools: {}", trace.associated_tools.join(", ")));
        }
    }

    let hidden = extraction.trace_count().saturating_sub(shown);
    if hidden > 0 {
        lines.push(format!("... {} more", hidden));
    }

    lines.join("\n")
}
