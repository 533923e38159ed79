use std::path::Path;
use tracegraph_index::TraceIndex;
use tracegraph_project::{ProjectedContext, ProjectionFunction, Query};
use tracegraph_transcript::Paths;

pub struct ProjectArgs {
    pub task: String,
    pub error: Option<String>,
    pub tools: Vec<String>,
    pub top_k: Option<usize>,
    pub transcripts: Option<String>,
    pub index: Option<String>,
    pub json: bool,
}

pub fn run(args: ProjectArgs) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = super::load_config(&paths);

    let index = match &args.index {
        Some(snapshot) => TraceIndex::load(Path::new(snapshot))?,
        None => {
            let dir = super::transcripts_dir(&paths, args.transcripts.as_deref());
            super::build_corpus(&dir, config.session_limit, &config)?.index
        }
    };

    let mut projection = ProjectionFunction::new(&config);
    if let Some(top_k) = args.top_k {
        projection = projection.with_top_k(top_k);
    }

    let mut query = Query::new(args.task).with_tools(args.tools);
    if let Some(error) = args.error {
        query = query.with_error(error);
    }

    let context = projection.project(&index, &query)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&context)?);
    } else {
        println!("{}", render(&context));
    }
    Ok(())
}

fn render(context: &ProjectedContext) -> String {
    if context.is_empty() {
        return "No relevant history found.\nRelevance: 0.00".to_string();
    }
    format!(
        "{}\nRelevance: {:.2}",
        context.to_prompt_context().trim_end(),
        context.relevance_score
    )
}
