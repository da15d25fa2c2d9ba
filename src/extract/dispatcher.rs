use crate::component::Component;
use crate::errors::Result;
use crate::extract::factory::create_extractor;
use crate::walk::Language;
use std::fs;
use std::path::{Path, PathBuf};

/// Routes source files to the right language extractor and normalizes
/// the paths recorded on the components it returns.
pub struct Dispatcher {
    root: Option<PathBuf>,
}

impl Dispatcher {
    /// Create a dispatcher that records paths relative to `root`.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Strip the extraction root from `path`, leaving a relative path.
    ///
    /// Paths outside the root (or already relative) pass through unchanged,
    /// so trimming an already-trimmed path is a no-op.
    pub fn trim_path(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => match path.strip_prefix(root) {
                Ok(trimmed) => trimmed.to_path_buf(),
                Err(_) => path.to_path_buf(),
            },
            None => path.to_path_buf(),
        }
    }

    /// Extract components from a single file.
    ///
    /// Files with an unsupported extension yield an empty list rather than
    /// an error; unreadable or unparseable files report one.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Component>> {
        let lang = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => match Language::from_extension(ext) {
                Some(lang) => lang,
                None => return Ok(Vec::new()),
            },
            None => return Ok(Vec::new()),
        };

        let source = fs::read_to_string(path)?;
        let trimmed = self.trim_path(path);
        let extractor = create_extractor(lang);
        extractor.extract(&source, &trimmed)
    }
}
