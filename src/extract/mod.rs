pub mod dispatcher;
pub mod factory;
pub mod java;
pub mod kotlin;
pub mod python;

pub use dispatcher::Dispatcher;

use crate::component::Component;
use crate::errors::Result;
use std::path::Path;

/// Structural extractor trait, implemented once per language.
pub trait Extractor {
    /// Return the tree-sitter Language for this extractor.
    fn language(&self) -> tree_sitter::Language;

    /// Extract classes and functions from a single file's source text.
    ///
    /// `file` is the already-trimmed path stamped onto every component;
    /// extractors never touch the filesystem themselves.
    fn extract(&self, source: &str, file: &Path) -> Result<Vec<Component>>;
}
