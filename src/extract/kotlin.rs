use crate::component::{Component, ComponentKind};
use crate::errors::{InquestError, Result};
use crate::extract::Extractor;
use std::path::Path;

pub struct KotlinExtractor;

impl KotlinExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The Kotlin grammar folds interfaces into `class_declaration`; the
    /// keyword token tells them apart.
    fn is_interface(node: tree_sitter::Node) -> bool {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).any(|c| c.kind() == "interface");
        found
    }

    /// Declaration name via the `name` field, falling back to a scan for the
    /// identifier kind the grammar uses at this position.
    fn declared_name(node: tree_sitter::Node, source: &[u8], identifier_kind: &str) -> String {
        if let Some(name) = node.child_by_field_name("name") {
            return name.utf8_text(source).unwrap_or_default().to_string();
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == identifier_kind {
                return child.utf8_text(source).unwrap_or_default().to_string();
            }
        }
        String::new()
    }

    fn child_of_kind<'t>(
        node: tree_sitter::Node<'t>,
        kind: &str,
    ) -> Option<tree_sitter::Node<'t>> {
        let mut cursor = node.walk();
        let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
        found
    }

    /// Render each declared parameter as `"<name>: <type>"`. A parameter the
    /// grammar leaves without a name or type renders that side as `_`.
    fn parameters(func: tree_sitter::Node, source: &[u8]) -> Vec<String> {
        let mut params = Vec::new();
        let params_node = match func
            .child_by_field_name("parameters")
            .or_else(|| Self::child_of_kind(func, "function_value_parameters"))
        {
            Some(p) => p,
            None => return params,
        };

        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            if !matches!(child.kind(), "parameter" | "value_parameter") {
                continue;
            }

            let name = match child
                .child_by_field_name("name")
                .or_else(|| Self::child_of_kind(child, "simple_identifier"))
            {
                Some(n) => n.utf8_text(source).unwrap_or_default().to_string(),
                None => "_".to_string(),
            };

            let ty = match child.child_by_field_name("type").or_else(|| {
                let mut inner = child.walk();
                let found = child
                    .named_children(&mut inner)
                    .find(|c| !matches!(c.kind(), "simple_identifier" | "parameter_modifiers"));
                found
            }) {
                Some(t) => Self::render_type(t, source),
                None => "_".to_string(),
            };

            params.push(format!("{name}: {ty}"));
        }
        params
    }

    /// Named types render by their identifier segments with type arguments
    /// dropped; any other type shape renders as raw source text.
    fn render_type(node: tree_sitter::Node, source: &[u8]) -> String {
        if node.kind() == "user_type" {
            let mut segments = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "type_identifier" {
                    segments.push(child.utf8_text(source).unwrap_or_default());
                }
            }
            if !segments.is_empty() {
                return segments.join(".");
            }
        }
        node.utf8_text(source).unwrap_or_default().to_string()
    }
}

impl Default for KotlinExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for KotlinExtractor {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_kotlin::language()
    }

    fn extract(&self, source: &str, file: &Path) -> Result<Vec<Component>> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language())
            .expect("failed to set Kotlin language");

        let tree = parser.parse(source, None).ok_or_else(|| InquestError::Parse {
            file: file.to_path_buf(),
            message: "parser produced no tree".to_string(),
        })?;
        if tree.root_node().has_error() {
            return Err(InquestError::Parse {
                file: file.to_path_buf(),
                message: "syntax error".to_string(),
            });
        }

        let bytes = source.as_bytes();
        let mut components = Vec::new();

        // Top-level classes and their direct member functions only; top-level
        // functions are not collected.
        let root = tree.root_node();
        let mut cursor = root.walk();
        for decl in root.named_children(&mut cursor) {
            if decl.kind() != "class_declaration" || Self::is_interface(decl) {
                continue;
            }
            let class_name = Self::declared_name(decl, bytes, "type_identifier");
            if class_name.is_empty() {
                continue;
            }
            components.push(Component {
                kind: ComponentKind::Class,
                name: class_name.clone(),
                full_name: class_name.clone(),
                file: file.to_path_buf(),
                lineno: decl.start_position().row + 1,
                docstring: None,
                parameters: None,
            });

            let body = match decl
                .child_by_field_name("body")
                .or_else(|| Self::child_of_kind(decl, "class_body"))
            {
                Some(b) => b,
                None => continue,
            };
            let mut members = body.walk();
            for member in body.named_children(&mut members) {
                if member.kind() != "function_declaration" {
                    continue;
                }
                let name = Self::declared_name(member, bytes, "simple_identifier");
                if name.is_empty() {
                    continue;
                }
                components.push(Component {
                    kind: ComponentKind::Function,
                    full_name: format!("{class_name}.{name}"),
                    name,
                    file: file.to_path_buf(),
                    lineno: member.start_position().row + 1,
                    docstring: None,
                    parameters: Some(Self::parameters(member, bytes)),
                });
            }
        }
        Ok(components)
    }
}
