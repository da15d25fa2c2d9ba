use crate::component::{Component, ComponentKind};
use serde::Serialize;

/// A component plus its rendered one-line summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    #[serde(flatten)]
    pub component: Component,
    pub summary: String,
}

/// Render one summary line per component, in input order.
pub fn summarize(components: &[Component]) -> Vec<ComponentSummary> {
    components
        .iter()
        .map(|c| ComponentSummary {
            component: c.clone(),
            summary: summary_line(c),
        })
        .collect()
}

/// `Function 'name(params)' in file (line N): <first docstring line>` for
/// functions with parameters; `Kind 'name' in file (line N): …` otherwise.
/// Without a docstring the line ends after the colon-space.
fn summary_line(c: &Component) -> String {
    let mut line = match (c.kind, c.parameters.as_deref()) {
        (ComponentKind::Function, Some(params)) if !params.is_empty() => format!(
            "Function '{}({})' in {} (line {}): ",
            c.name,
            params.join(", "),
            c.file.display(),
            c.lineno
        ),
        _ => format!(
            "{} '{}' in {} (line {}): ",
            c.kind.capitalized(),
            c.name,
            c.file.display(),
            c.lineno
        ),
    };
    if let Some(docstring) = &c.docstring {
        if let Some(first_line) = docstring.lines().next() {
            line.push_str(first_line);
        }
    }
    line
}
