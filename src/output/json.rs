use crate::component::Component;
use crate::errors::Result;
use crate::questions::Question;
use crate::summary::ComponentSummary;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput<'a> {
    pub metadata: &'a Metadata,
    pub components: &'a [Component],
    pub summaries: &'a [ComponentSummary],
    pub failures: &'a [ParseFailure],
}

#[derive(Debug, Serialize)]
pub struct QuestionsOutput<'a> {
    pub metadata: &'a Metadata,
    pub questions: &'a [Question],
    pub failures: &'a [ParseFailure],
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub root: PathBuf,
    /// Language filter in effect, or `all`.
    pub language: String,
    pub files_scanned: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub components: usize,
    pub classes: usize,
    pub functions: usize,
    pub elapsed_ms: u64,
}

/// One unparsable file, recorded instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Write analyze output as JSON.
pub fn write_analyze_json<W: Write>(
    writer: &mut W,
    metadata: &Metadata,
    components: &[Component],
    summaries: &[ComponentSummary],
    failures: &[ParseFailure],
) -> Result<()> {
    let output = AnalyzeOutput {
        metadata,
        components,
        summaries,
        failures,
    };
    serde_json::to_writer_pretty(writer, &output)?;
    Ok(())
}

/// Write questions output as JSON.
pub fn write_questions_json<W: Write>(
    writer: &mut W,
    metadata: &Metadata,
    questions: &[Question],
    failures: &[ParseFailure],
) -> Result<()> {
    let output = QuestionsOutput {
        metadata,
        questions,
        failures,
    };
    serde_json::to_writer_pretty(writer, &output)?;
    Ok(())
}
