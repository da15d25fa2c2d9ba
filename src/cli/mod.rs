pub mod analyze;
pub mod config;
pub mod questions;

use crate::errors::Result;
use crate::walk::Language;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "inquest",
    version,
    about = "Structural code explorer and interview question generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract classes and functions from a codebase
    Analyze(analyze::AnalyzeArgs),
    /// Generate interview questions about a codebase
    Questions(questions::QuestionsArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => analyze::run(&args),
        Commands::Questions(args) => questions::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

pub(crate) fn parse_language(s: &str) -> std::result::Result<Language, String> {
    s.parse()
}
