use crate::acquire::SourceSpec;
use crate::component::{Component, ComponentKind};
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::{InquestError, Result};
use crate::extract::Dispatcher;
use crate::output::json::{Metadata, ParseFailure};
use crate::output::OutputFormat;
use crate::walk::{self, Language};
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
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
}

/// Everything the extraction phase produced for one source tree.
pub(crate) struct Analysis {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub components: Vec<Component>,
    pub failures: Vec<ParseFailure>,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
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
            count: None,
            seed: None,
        },
    )?;

    let analysis = collect(&config, &args.source)?;
    let summaries = crate::summary::summarize(&analysis.components);

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let metadata = build_metadata(&config, &analysis, elapsed_ms);

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Json => {
            crate::output::json::write_analyze_json(
                &mut stdout,
                &metadata,
                &analysis.components,
                &summaries,
                &analysis.failures,
            )?;
        }
        OutputFormat::Text => {
            crate::output::text::write_analyze_text(
                &mut stdout,
                &metadata,
                &summaries,
                &analysis.failures,
            )?;
        }
    }

    if !config.quiet {
        eprintln!(
            "Analyzed {} components across {} files in {:.2}s",
            metadata.components,
            metadata.files_parsed,
            elapsed_ms as f64 / 1000.0
        );
    }

    Ok(())
}

/// Acquire the source tree, discover candidate files, and extract
/// components from each one. Shared by `analyze` and `questions`.
pub(crate) fn collect(config: &ResolvedConfig, source: &str) -> Result<Analysis> {
    let workspace = SourceSpec::parse(source)?.fetch()?;
    let root = workspace.root().to_path_buf();

    let excludes = config.effective_excludes();
    let files = walk::discover_files(&root, config.lang, &config.include, &excludes)?;

    if files.is_empty() {
        return Err(InquestError::NoFiles { path: root });
    }

    // Progress bar for the parse phase
    let progress = if !config.quiet {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let dispatcher = Dispatcher::new(Some(root.clone()));

    // Parallel parse: each worker creates its own tree-sitter Parser
    // (Parser is not Send). Collect preserves file order.
    let outcomes: Vec<(PathBuf, Result<Vec<Component>>)> = files
        .par_iter()
        .map(|file_path| {
            let outcome = dispatcher.analyze_file(file_path);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            (dispatcher.trim_path(file_path), outcome)
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut components = Vec::new();
    let mut failures = Vec::new();
    for (file, outcome) in outcomes {
        match outcome {
            Ok(mut found) => components.append(&mut found),
            Err(err) => {
                if config.strict {
                    return Err(err);
                }
                tracing::warn!("Skipping {}: {}", file.display(), err);
                let message = match err {
                    InquestError::Parse { message, .. } => message,
                    other => other.to_string(),
                };
                failures.push(ParseFailure { file, message });
            }
        }
    }

    Ok(Analysis {
        root,
        files_scanned: files.len(),
        components,
        failures,
    })
}

pub(crate) fn build_metadata(
    config: &ResolvedConfig,
    analysis: &Analysis,
    elapsed_ms: u64,
) -> Metadata {
    let classes = analysis
        .components
        .iter()
        .filter(|c| c.kind == ComponentKind::Class)
        .count();

    Metadata {
        root: analysis.root.clone(),
        language: config
            .lang
            .map_or_else(|| "all".to_string(), |l| l.to_string()),
        files_scanned: analysis.files_scanned,
        files_parsed: analysis.files_scanned - analysis.failures.len(),
        files_failed: analysis.failures.len(),
        components: analysis.components.len(),
        classes,
        functions: analysis.components.len() - classes,
        elapsed_ms,
    }
}
