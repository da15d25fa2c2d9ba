use serde::Serialize;
use std::path::PathBuf;

/// Kind of declaration a [`Component`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Class,
    Function,
}

impl ComponentKind {
    /// Lowercase label, as serialized (`class` / `function`).
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Class => "class",
            ComponentKind::Function => "function",
        }
    }

    /// Capitalized label for prose output (`Class` / `Function`).
    pub fn capitalized(&self) -> &'static str {
        match self {
            ComponentKind::Class => "Class",
            ComponentKind::Function => "Function",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One class or function declaration found in source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    /// Declaration kind
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Declared identifier, unqualified
    pub name: String,
    /// `name` prefixed with the nearest enclosing class, if any
    pub full_name: String,
    /// Declaring file, relative to the extraction root
    pub file: PathBuf,
    /// Source line of the declaration (1-indexed)
    pub lineno: usize,
    /// Leading documentation string, when the language carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    /// Ordered parameter descriptors; absent for classes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({}:{})",
            self.kind,
            self.name,
            self.file.display(),
            self.lineno
        )
    }
}
