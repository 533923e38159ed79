use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tracegraph")]
#[command(version)]
#[command(about = "Decision traces mined from agent session transcripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract decision traces from one session transcript
    Extract {
        /// Path to session JSONL
        #[arg(short, long)]
        file: String,

        /// Print traces as JSON
        #[arg(long)]
        json: bool,

        /// Only print the first N traces
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Aggregate recent sessions and print the cross-session report
    Analyze {
        /// Directory of transcripts (defaults to ~/.claude/projects)
        #[arg(long)]
        transcripts: Option<String>,

        /// Number of most recent sessions to analyze
        #[arg(long)]
        sample: Option<usize>,

        /// Print index statistics and session summaries as JSON
        #[arg(long)]
        json: bool,

        /// Cache the aggregated index snapshot
        #[arg(long)]
        save: bool,
    },

    /// Project historical decisions onto a task
    Project {
        /// Description of the current task
        #[arg(short, long)]
        task: String,

        /// Error text, if the task is a recovery
        #[arg(short, long)]
        error: Option<String>,

        /// Tool already being considered (repeatable)
        #[arg(long = "tool")]
        tools: Vec<String>,

        #[arg(long)]
        top_k: Option<usize>,

        /// Directory of transcripts to aggregate
        #[arg(long, conflicts_with = "index")]
        transcripts: Option<String>,

        /// Cached index snapshot to query instead of re-aggregating
        #[arg(long)]
        index: Option<String>,

        /// Print the projected context as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print version information
    Version,
}
