use crate::component::{Component, ComponentKind};
use crate::errors::{InquestError, Result};
use crate::extract::Extractor;
use std::collections::HashMap;
use std::path::Path;

pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Record every node's parent in one pass over the tree.
    /// tree-sitter's `Node::parent()` re-descends from the root per call.
    fn build_parent_map<'t>(
        node: tree_sitter::Node<'t>,
        parents: &mut HashMap<usize, tree_sitter::Node<'t>>,
    ) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            parents.insert(child.id(), node);
            Self::build_parent_map(child, parents);
        }
    }

    fn walk_definitions<'t>(
        node: tree_sitter::Node<'t>,
        source: &[u8],
        file: &Path,
        parents: &HashMap<usize, tree_sitter::Node<'t>>,
        components: &mut Vec<Component>,
    ) {
        match node.kind() {
            "class_definition" => {
                let name = Self::declared_name(node, source);
                components.push(Component {
                    kind: ComponentKind::Class,
                    full_name: name.clone(),
                    name,
                    file: file.to_path_buf(),
                    lineno: node.start_position().row + 1,
                    docstring: Self::docstring(node, source),
                    parameters: None,
                });
            }
            "function_definition" => {
                let name = Self::declared_name(node, source);
                let full_name = match Self::enclosing_class(node, parents, source) {
                    Some(class_name) => format!("{class_name}.{name}"),
                    None => name.clone(),
                };
                components.push(Component {
                    kind: ComponentKind::Function,
                    name,
                    full_name,
                    file: file.to_path_buf(),
                    lineno: node.start_position().row + 1,
                    docstring: Self::docstring(node, source),
                    parameters: Some(Self::positional_params(node, source)),
                });
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::walk_definitions(child, source, file, parents, components);
        }
    }

    fn declared_name(node: tree_sitter::Node, source: &[u8]) -> String {
        node.child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .unwrap_or_default()
            .to_string()
    }

    /// Name of the nearest class definition lexically enclosing `node`, if any.
    fn enclosing_class<'t>(
        node: tree_sitter::Node<'t>,
        parents: &HashMap<usize, tree_sitter::Node<'t>>,
        source: &[u8],
    ) -> Option<String> {
        let mut current = parents.get(&node.id()).copied();
        while let Some(ancestor) = current {
            if ancestor.kind() == "class_definition" {
                return Some(Self::declared_name(ancestor, source));
            }
            current = parents.get(&ancestor.id()).copied();
        }
        None
    }

    /// Docstring of a class or function body, cleaned the way `inspect.cleandoc`
    /// cleans it. Bytes and f-string literals never count as docstrings.
    fn docstring(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
        let body = node.child_by_field_name("body")?;
        let first = body.named_child(0)?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let expr = first.named_child(0)?;
        if expr.kind() != "string" {
            return None;
        }
        let raw = expr.utf8_text(source).ok()?;
        let (prefix, literal) = split_string_prefix(raw);
        if prefix.chars().any(|c| matches!(c, 'b' | 'B' | 'f' | 'F')) {
            return None;
        }
        let cleaned = clean_docstring(strip_quotes(literal));
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Positional parameter names, in declaration order. Collection stops at
    /// the first `*` / `*args` / `**kwargs`; everything after is keyword-only.
    fn positional_params(node: tree_sitter::Node, source: &[u8]) -> Vec<String> {
        let mut params = Vec::new();
        let params_node = match node.child_by_field_name("parameters") {
            Some(p) => p,
            None => return params,
        };

        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    params.push(child.utf8_text(source).unwrap_or_default().to_string());
                }
                "typed_parameter" => {
                    if let Some(name) = child.named_child(0) {
                        if name.kind() == "identifier" {
                            params.push(name.utf8_text(source).unwrap_or_default().to_string());
                        }
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        params.push(name.utf8_text(source).unwrap_or_default().to_string());
                    }
                }
                // The `/` marker separates positional-only params; not a name.
                "positional_separator" => {}
                "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
                _ => {}
            }
        }
        params
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PythonExtractor {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_python::language()
    }

    fn extract(&self, source: &str, file: &Path) -> Result<Vec<Component>> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language())
            .expect("failed to set Python language");

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
        let mut parents = HashMap::new();
        Self::build_parent_map(tree.root_node(), &mut parents);

        let mut components = Vec::new();
        Self::walk_definitions(tree.root_node(), bytes, file, &parents, &mut components);
        Ok(components)
    }
}

/// Split a string literal into its prefix letters (`r`, `b`, `f`, `u`) and the
/// quoted remainder.
fn split_string_prefix(raw: &str) -> (&str, &str) {
    match raw.find(['"', '\'']) {
        Some(idx) => raw.split_at(idx),
        None => ("", raw),
    }
}

/// Drop the surrounding quotes from a string literal body.
fn strip_quotes(literal: &str) -> &str {
    for delim in ["\"\"\"", "'''"] {
        if literal.len() >= 6 && literal.starts_with(delim) && literal.ends_with(delim) {
            return &literal[3..literal.len() - 3];
        }
    }
    for delim in ["\"", "'"] {
        if literal.len() >= 2 && literal.starts_with(delim) && literal.ends_with(delim) {
            return &literal[1..literal.len() - 1];
        }
    }
    literal
}

/// Normalize docstring indentation like `inspect.cleandoc`: expand tabs, strip
/// the common margin from every line after the first, and drop blank edges.
fn clean_docstring(raw: &str) -> String {
    let mut lines: Vec<String> = raw.split('\n').map(expand_tabs).collect();

    let mut margin = usize::MAX;
    for line in lines.iter().skip(1) {
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        if indent < line.chars().count() {
            margin = margin.min(indent);
        }
    }

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if margin < usize::MAX {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    lines.join("\n")
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = 8 - col % 8;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<Component> {
        PythonExtractor::new()
            .extract(source, Path::new("app.py"))
            .unwrap()
    }

    #[test]
    fn class_docstring_and_method_qualification() {
        let components = extract("class A:\n    \"\"\"Hello.\"\"\"\n    def f(self):\n        pass\n");
        assert_eq!(components.len(), 2);

        assert_eq!(components[0].kind, ComponentKind::Class);
        assert_eq!(components[0].name, "A");
        assert_eq!(components[0].full_name, "A");
        assert_eq!(components[0].docstring.as_deref(), Some("Hello."));
        assert_eq!(components[0].parameters, None);

        assert_eq!(components[1].kind, ComponentKind::Function);
        assert_eq!(components[1].full_name, "A.f");
        assert_eq!(components[1].docstring, None);
        assert_eq!(components[1].parameters.as_deref(), Some(&["self".to_string()][..]));
    }

    #[test]
    fn method_parameters_keep_declaration_order() {
        let components =
            extract("class Point:\n    def move(self, dx, dy):\n        pass\n");
        let method = &components[1];
        assert_eq!(method.full_name, "Point.move");
        assert_eq!(
            method.parameters,
            Some(vec!["self".to_string(), "dx".to_string(), "dy".to_string()])
        );
    }

    #[test]
    fn top_level_function_is_unqualified() {
        let components = extract("def do():\n    pass\n");
        assert_eq!(components[0].name, "do");
        assert_eq!(components[0].full_name, "do");
        assert_eq!(components[0].lineno, 1);
    }

    #[test]
    fn nested_function_qualifies_to_nearest_class() {
        let source = "class Outer:\n    def f(self):\n        def g():\n            pass\n";
        let components = extract(source);
        let inner = components.iter().find(|c| c.name == "g").unwrap();
        assert_eq!(inner.full_name, "Outer.g");
    }

    #[test]
    fn nested_class_name_stays_unqualified() {
        let components = extract("class Outer:\n    class Inner:\n        pass\n");
        let inner = components.iter().find(|c| c.name == "Inner").unwrap();
        assert_eq!(inner.full_name, "Inner");
    }

    #[test]
    fn typed_and_defaulted_params_counted_splats_dropped() {
        let components = extract("def f(a, b: int, c=1, *args, **kw):\n    pass\n");
        assert_eq!(
            components[0].parameters,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn keyword_only_params_are_excluded() {
        let components = extract("def f(a, *, b):\n    pass\n");
        assert_eq!(components[0].parameters, Some(vec!["a".to_string()]));
    }

    #[test]
    fn positional_only_marker_is_skipped() {
        let components = extract("def f(a, /, b):\n    pass\n");
        assert_eq!(
            components[0].parameters,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn decorated_method_still_qualifies() {
        let source = "class C:\n    @staticmethod\n    def s(x):\n        return x\n";
        let components = extract(source);
        let method = components.iter().find(|c| c.name == "s").unwrap();
        assert_eq!(method.full_name, "C.s");
        assert_eq!(method.parameters, Some(vec!["x".to_string()]));
    }

    #[test]
    fn async_function_is_extracted() {
        let components = extract("async def fetch(url):\n    pass\n");
        assert_eq!(components[0].name, "fetch");
        assert_eq!(components[0].parameters, Some(vec!["url".to_string()]));
    }

    #[test]
    fn multiline_docstring_is_dedented() {
        let source =
            "def f():\n    \"\"\"First line.\n\n    Indented body.\n    \"\"\"\n    pass\n";
        let components = extract(source);
        assert_eq!(
            components[0].docstring.as_deref(),
            Some("First line.\n\nIndented body.")
        );
    }

    #[test]
    fn empty_docstring_is_absent() {
        let components = extract("class E:\n    \"\"\"\"\"\"\n");
        assert_eq!(components[0].docstring, None);
    }

    #[test]
    fn fstring_is_not_a_docstring() {
        let components = extract("def f():\n    f\"not a docstring\"\n");
        assert_eq!(components[0].docstring, None);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let components = extract("x = 1\n\nclass Late:\n    pass\n");
        assert_eq!(components[0].lineno, 3);
    }

    #[test]
    fn syntax_error_is_reported() {
        let result = PythonExtractor::new().extract("def broken(:\n", Path::new("bad.py"));
        assert!(result.is_err());
    }

    #[test]
    fn cleandoc_keeps_relative_indentation() {
        let cleaned = clean_docstring("Summary.\n        Details:\n            - item\n    ");
        assert_eq!(cleaned, "Summary.\nDetails:\n    - item");
    }
}
