use crate::errors::Result;
use globset::{Glob, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Supported language for file discovery and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Java,
    Kotlin,
}

impl Language {
    /// File extensions for this language.
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Python => &["py"],
            Language::Java => &["java"],
            Language::Kotlin => &["kt"],
        }
    }

    /// Map a bare file extension to its language.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext {
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "kt" => Some(Language::Kotlin),
            _ => None,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "kotlin" | "kt" => Ok(Language::Kotlin),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::Java => write!(f, "java"),
            Language::Kotlin => write!(f, "kotlin"),
        }
    }
}

/// Discover source files under `root`.
///
/// - Respects `.gitignore`
/// - Keeps only supported extensions (all languages, or just `lang` if set)
/// - Applies include/exclude glob patterns
/// - Returns sorted paths for deterministic output
pub fn discover_files(
    root: &Path,
    lang: Option<Language>,
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>> {
    // Build exclude globset
    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in exclude_patterns {
        exclude_builder.add(Glob::new(pattern)?);
    }
    let exclude_set = exclude_builder.build()?;

    // Build include globset (if any patterns specified)
    let include_set = if include_patterns.is_empty() {
        None
    } else {
        let mut builder = GlobSetBuilder::new();
        for pattern in include_patterns {
            builder.add(Glob::new(pattern)?);
        }
        Some(builder.build()?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();

        // Only consider files
        if !path.is_file() {
            continue;
        }

        // Check extension against the requested language set
        let file_lang = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension);
        let lang_match = match (file_lang, lang) {
            (Some(found), Some(only)) => found == only,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if !lang_match {
            continue;
        }

        // Get relative path for glob matching
        let relative = path.strip_prefix(root).unwrap_or(path);

        // Apply exclude patterns
        if exclude_set.is_match(relative) || exclude_set.is_match(path) {
            continue;
        }
        // Also check just the filename for patterns like *_test.py
        if let Some(fname) = path.file_name() {
            if exclude_set.is_match(Path::new(fname)) {
                continue;
            }
        }

        // Apply include patterns (if any)
        if let Some(ref include) = include_set {
            if !include.is_match(relative) && !include.is_match(path) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}
