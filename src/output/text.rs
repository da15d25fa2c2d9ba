use crate::errors::Result;
use crate::output::json::{Metadata, ParseFailure};
use crate::questions::Question;
use crate::summary::ComponentSummary;
use std::io::Write;

/// Write analyze output as human-readable text.
pub fn write_analyze_text<W: Write>(
    writer: &mut W,
    metadata: &Metadata,
    summaries: &[ComponentSummary],
    failures: &[ParseFailure],
) -> Result<()> {
    writeln!(writer, "Inquest Analysis Report")?;
    writeln!(writer, "=======================")?;
    writeln!(writer)?;
    writeln!(writer, "Root:       {}", metadata.root.display())?;
    writeln!(writer, "Language:   {}", metadata.language)?;
    writeln!(writer, "Scanned:    {} files", metadata.files_scanned)?;
    writeln!(writer, "Parsed:     {} files", metadata.files_parsed)?;
    writeln!(writer, "Failed:     {} files", metadata.files_failed)?;
    writeln!(
        writer,
        "Components: {} ({} classes, {} functions)",
        metadata.components, metadata.classes, metadata.functions
    )?;
    writeln!(writer, "Elapsed:    {} ms", metadata.elapsed_ms)?;

    if !summaries.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Components")?;
        writeln!(writer, "----------")?;
        for s in summaries {
            writeln!(writer, "{}", s.summary)?;
        }
    }

    write_failures(writer, failures)?;
    Ok(())
}

/// Write questions output as human-readable text.
pub fn write_questions_text<W: Write>(
    writer: &mut W,
    questions: &[Question],
    failures: &[ParseFailure],
) -> Result<()> {
    writeln!(writer, "Inquest Interview Questions")?;
    writeln!(writer, "===========================")?;
    writeln!(writer)?;

    if questions.is_empty() {
        writeln!(writer, "No questions generated.")?;
    }
    for (i, q) in questions.iter().enumerate() {
        writeln!(writer, "{:>2}. [{}] {}", i + 1, q.difficulty, q.question)?;
        writeln!(writer, "    Answer: {}", q.answer)?;
        writeln!(writer)?;
    }

    write_failures(writer, failures)?;
    Ok(())
}

fn write_failures<W: Write>(writer: &mut W, failures: &[ParseFailure]) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "Failures")?;
    writeln!(writer, "--------")?;
    for f in failures {
        writeln!(writer, "{}: {}", f.file.display(), f.message)?;
    }
    Ok(())
}
