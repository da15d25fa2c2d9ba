pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::output::OutputFormat;
use crate::walk::Language;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Fully resolved configuration. Option is left only on settings that are
/// genuinely optional.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Defaults
    /// Language filter; None analyzes all supported languages.
    pub lang: Option<Language>,
    pub format: OutputFormat,
    pub quiet: bool,
    /// Abort on the first parse failure instead of recording it.
    pub strict: bool,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,

    // Questions
    pub count: usize,
    /// Shuffle seed; None draws from entropy.
    pub seed: Option<u64>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Exclude patterns merged with ignore-file patterns, the way file
    /// discovery consumes them.
    pub fn effective_excludes(&self) -> Vec<String> {
        let mut patterns = self.exclude.clone();
        patterns.extend(self.ignore_patterns.iter().cloned());
        patterns
    }
}
