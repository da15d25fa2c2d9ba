use crate::errors::{InquestError, Result};
use git2::Repository;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Classified SOURCE argument: a directory on disk or a remote git URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    LocalDir(PathBuf),
    GitUrl(String),
}

impl SourceSpec {
    /// Classify the raw SOURCE argument.
    ///
    /// Anything that is neither a git URL nor an existing directory is
    /// rejected here, before any work starts. Archives are not supported.
    pub fn parse(input: &str) -> Result<SourceSpec> {
        if input.starts_with("http://") || input.starts_with("https://") || input.starts_with("git@")
        {
            return Ok(SourceSpec::GitUrl(input.to_string()));
        }

        let path = Path::new(input);
        if path.is_dir() {
            let canonical = path.canonicalize()?;
            return Ok(SourceSpec::LocalDir(canonical));
        }

        Err(InquestError::InvalidSource {
            input: input.to_string(),
        })
    }

    /// Materialize the source as a directory on disk.
    pub fn fetch(&self) -> Result<Workspace> {
        match self {
            SourceSpec::LocalDir(dir) => Ok(Workspace {
                root: dir.clone(),
                temp: None,
            }),
            SourceSpec::GitUrl(url) => {
                let temp = TempDir::new()?;
                tracing::info!(url = %url, "cloning repository");
                Repository::clone(url, temp.path())?;
                Ok(Workspace {
                    root: temp.path().to_path_buf(),
                    temp: Some(temp),
                })
            }
        }
    }
}

/// A checked-out codebase root. Holds the temp directory alive for cloned
/// repositories; dropping the workspace removes the clone.
pub struct Workspace {
    root: PathBuf,
    temp: Option<TempDir>,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }
}
