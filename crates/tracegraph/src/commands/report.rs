use tracegraph_core::truncate_chars;
use tracegraph_index::TraceIndex;

const RULE_WIDTH: usize = 70;
const TOP_TOOLS: usize = 15;
const TOP_SEQUENCES: usize = 10;
const SAMPLE_RECOVERIES: usize = 10;
const RECOVERY_CHARS: usize = 70;
/// Recovery share above which error prevention is flagged
const HIGH_RECOVERY_PCT: f64 = 20.0;

fn heading(lines: &mut Vec<String>, title: &str, rule: char) {
    let bar = rule.to_string().repeat(RULE_WIDTH);
    lines.push(String::new());
    lines.push(bar.clone());
    lines.push(title.to_string());
    lines.push(bar);
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Human-readable cross-session report
pub fn build_report(index: &TraceIndex) -> String {
    let projects: Vec<&str> = index.projects().iter().map(|p| p.as_str()).collect();
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "CROSS-SESSION DECISION PATTERN ANALYSIS".to_string(),
        rule,
        String::new(),
        format!("Sessions analyzed: {}", index.session_count()),
        format!("Total decision traces: {}", index.trace_count()),
        format!("Projects covered: {}", projects.len()),
    ];
    if !projects.is_empty() {
        lines.push(format!("  ({})", projects.join(", ")));
    }

    if index.trace_count() == 0 {
        lines.push(String::new());
        lines.push("No decision traces found.".to_string());
        return lines.join("\n");
    }

    let distribution = index.decision_type_distribution();
    let total: usize = distribution.iter().map(|(_, count)| count).sum();

    heading(&mut lines, "DECISION TYPE DISTRIBUTION", '-');
    for (decision_type, count) in &distribution {
        let pct = percent(*count, total);
        let bar = "█".repeat((pct / 2.0) as usize);
        lines.push(format!("  {:20} {:4} ({:5.1}%) {}", decision_type, count, pct, bar));
    }

    let tools = index.top_tools(TOP_TOOLS);
    if !tools.is_empty() {
        heading(&mut lines, "TOOL USAGE", '-');
        for (tool, count) in &tools {
            lines.push(format!("  {:20} {:4}", tool, count));
        }
    }

    let sequences = index.top_tool_sequences(TOP_SEQUENCES);
    if !sequences.is_empty() {
        heading(&mut lines, "TOOL SEQUENCES", '-');
        for (sequence, count) in &sequences {
            lines.push(format!("  {:30} {:4}", sequence, count));
        }
    }

    let recoveries: Vec<_> = index.recovery_traces().take(SAMPLE_RECOVERIES).collect();
    if !recoveries.is_empty() {
        heading(&mut lines, "SAMPLE RECOVERY PATTERNS (Error Handling)", '-');
        for (i, trace) in recoveries.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, truncate_chars(&trace.summary, RECOVERY_CHARS)));
        }
    }

    heading(&mut lines, "INSIGHTS", '=');
    lines.push(String::new());

    if let Some((decision_type, count)) = distribution.first() {
        lines.push(format!(
            "• Most common decision type: {} ({} instances)",
            decision_type, count
        ));
    }

    let recovery_pct = percent(index.recovery_catalogue().len(), total);
    lines.push(String::new());
    lines.push(format!(
        "• Recovery rate: {:.1}% of decisions are error recovery",
        recovery_pct
    ));
    if recovery_pct > HIGH_RECOVERY_PCT {
        lines.push("  → High recovery rate suggests room for proactive error prevention".to_string());
    } else {
        lines.push("  → Low recovery rate indicates smooth workflows".to_string());
    }

    let trio: Vec<&str> = tools.iter().take(3).map(|(tool, _)| tool.as_str()).collect();
    if !trio.is_empty() {
        lines.push(String::new());
        lines.push(format!("• Top tool trio: {}", trio.join(", ")));
    }

    lines.push(String::new());
    lines.join("\n")
}
