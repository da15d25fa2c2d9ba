use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::Result;
use crate::output::OutputFormat;
use crate::walk::Language;
use clap::Args;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct QuestionsArgs {
    /// Directory or git URL to analyze
    pub source: String,

    /// Restrict analysis to one language (python, java, kotlin)
    #[arg(long, value_parser = super::parse_language)]
    pub lang: Option<Language>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Abort on the first file that fails to parse
    #[arg(long)]
    pub strict: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,

    /// Only ask about components whose name or docstring matches
    #[arg(long)]
    pub focus: Option<String>,

    /// Number of questions to generate
    #[arg(long)]
    pub count: Option<usize>,

    /// Shuffle seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: &QuestionsArgs) -> Result<()> {
    let start = Instant::now();

    let working_dir = std::env::current_dir()?;
    let config = resolve_config(
        &working_dir,
        &CliOverrides {
            lang: args.lang,
            format: args.format,
            quiet: args.quiet,
            strict: args.strict,
            include: args.include.clone(),
            exclude: args.exclude.clone(),
            count: args.count,
            seed: args.seed,
        },
    )?;

    let analysis = super::analyze::collect(&config, &args.source)?;
    let summaries = crate::summary::summarize(&analysis.components);
    let questions = crate::questions::generate(
        &summaries,
        args.focus.as_deref(),
        config.count,
        config.seed,
    );

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let metadata = super::analyze::build_metadata(&config, &analysis, elapsed_ms);

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Json => {
            crate::output::json::write_questions_json(
                &mut stdout,
                &metadata,
                &questions,
                &analysis.failures,
            )?;
        }
        OutputFormat::Text => {
            crate::output::text::write_questions_text(&mut stdout, &questions, &analysis.failures)?;
        }
    }

    if !config.quiet {
        eprintln!(
            "Generated {} questions from {} components in {:.2}s",
            questions.len(),
            metadata.components,
            elapsed_ms as f64 / 1000.0
        );
    }

    Ok(())
}
