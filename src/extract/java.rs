use crate::component::{Component, ComponentKind};
use crate::errors::{InquestError, Result};
use crate::extract::Extractor;
use std::path::Path;

pub struct JavaExtractor;

impl JavaExtractor {
    pub fn new() -> Self {
        Self
    }

    fn walk<'t>(
        node: tree_sitter::Node<'t>,
        source: &[u8],
        file: &Path,
        path: &mut Vec<tree_sitter::Node<'t>>,
        components: &mut Vec<Component>,
    ) {
        match node.kind() {
            "class_declaration" => {
                let name = Self::declared_name(node, source);
                components.push(Component {
                    kind: ComponentKind::Class,
                    full_name: name.clone(),
                    name,
                    file: file.to_path_buf(),
                    lineno: node.start_position().row + 1,
                    docstring: None,
                    parameters: None,
                });
            }
            "method_declaration" => {
                let name = Self::declared_name(node, source);
                // Innermost enclosing class wins; interface and enum members
                // stay unqualified.
                let full_name = match path.iter().rev().find(|n| n.kind() == "class_declaration") {
                    Some(class_node) => {
                        format!("{}.{name}", Self::declared_name(*class_node, source))
                    }
                    None => name.clone(),
                };
                components.push(Component {
                    kind: ComponentKind::Function,
                    name,
                    full_name,
                    file: file.to_path_buf(),
                    lineno: node.start_position().row + 1,
                    docstring: None,
                    parameters: Some(Self::parameters(node, source)),
                });
            }
            _ => {}
        }

        path.push(node);
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk(child, source, file, path, components);
        }
        path.pop();
    }

    fn declared_name(node: tree_sitter::Node, source: &[u8]) -> String {
        node.child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .unwrap_or_default()
            .to_string()
    }

    /// Render each formal parameter as `"<type> <name>"`, with array
    /// dimensions appended to the type as `[]` pairs.
    fn parameters(node: tree_sitter::Node, source: &[u8]) -> Vec<String> {
        let mut params = Vec::new();
        let params_node = match node.child_by_field_name("parameters") {
            Some(p) => p,
            None => return params,
        };

        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameter" => {
                    let mut ty = child
                        .child_by_field_name("type")
                        .map(|t| Self::render_type(t, source))
                        .unwrap_or_default();
                    // C-style dimensions sit on the declarator, not the type.
                    if let Some(dims) = child.child_by_field_name("dimensions") {
                        ty.push_str(&Self::render_dimensions(dims, source));
                    }
                    let name = child
                        .child_by_field_name("name")
                        .and_then(|n| n.utf8_text(source).ok())
                        .unwrap_or_default();
                    params.push(format!("{ty} {name}"));
                }
                "spread_parameter" => {
                    let mut ty = String::new();
                    let mut name = String::new();
                    let mut inner = child.walk();
                    for part in child.named_children(&mut inner) {
                        match part.kind() {
                            "modifiers" => {}
                            "variable_declarator" => {
                                name = part
                                    .child_by_field_name("name")
                                    .and_then(|n| n.utf8_text(source).ok())
                                    .unwrap_or_default()
                                    .to_string();
                            }
                            _ if ty.is_empty() => ty = Self::render_type(part, source),
                            _ => {}
                        }
                    }
                    params.push(format!("{ty} {name}"));
                }
                _ => {}
            }
        }
        params
    }

    /// Base type name: generic arguments are dropped, array types keep their
    /// bracket suffix.
    fn render_type(node: tree_sitter::Node, source: &[u8]) -> String {
        match node.kind() {
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .map(|e| Self::render_type(e, source))
                    .unwrap_or_default();
                let dims = node
                    .child_by_field_name("dimensions")
                    .map(|d| Self::render_dimensions(d, source))
                    .unwrap_or_default();
                format!("{element}{dims}")
            }
            "generic_type" => node
                .named_child(0)
                .map(|base| Self::render_type(base, source))
                .unwrap_or_default(),
            _ => node.utf8_text(source).unwrap_or_default().to_string(),
        }
    }

    fn render_dimensions(node: tree_sitter::Node, source: &[u8]) -> String {
        let text = node.utf8_text(source).unwrap_or_default();
        "[]".repeat(text.matches('[').count())
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for JavaExtractor {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_java::language()
    }

    fn extract(&self, source: &str, file: &Path) -> Result<Vec<Component>> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language())
            .expect("failed to set Java language");

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
        let mut path = Vec::new();
        Self::walk(tree.root_node(), bytes, file, &mut path, &mut components);
        Ok(components)
    }
}
