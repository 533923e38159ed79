mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries reports and JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { file, json, limit } => commands::extract::run(&file, json, limit),
        Commands::Analyze {
            transcripts,
            sample,
            json,
            save,
        } => commands::analyze::run(transcripts.as_deref(), sample, json, save),
        Commands::Project {
            task,
            error,
            tools,
            top_k,
            transcripts,
            index,
            json,
        } => commands::project::run(commands::project::ProjectArgs {
            task,
            error,
            tools,
            top_k,
            transcripts,
            index,
            json,
        }),
        Commands::Version => commands::version::run(),
    }
}
