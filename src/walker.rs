//! Python structure walker.
//!
//! Parses the source with tree-sitter and describes the constructs that can
//! carry documentation: module-level classes and functions, plus the methods
//! declared directly in a class body. Anything nested deeper (functions in
//! functions, classes in classes, definitions under `if`/`try`) produces no
//! descriptor.

use crate::error::{Error, Result};
use crate::model::{ConstructDescriptor, ConstructKind, Param};
use std::path::PathBuf;
use tree_sitter::{Node, Parser, Tree};

/// Placeholder path for syntax errors raised on in-memory source.
pub const SOURCE_PLACEHOLDER: &str = "<source>";

/// Receivers dropped from the front of a method's parameter list.
const RECEIVERS: &[&str] = &["self", "cls"];

/// Parse `source` and describe its constructs.
///
/// Returns the module descriptor; its `children` are the top-level classes
/// and functions in declaration order.
pub fn walk(module_name: &str, source: &str) -> Result<ConstructDescriptor> {
    let tree = parse(source)?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(syntax_error(root, source));
    }

    let mut module = ConstructDescriptor {
        kind: ConstructKind::Module,
        name: module_name.to_string(),
        line: 1,
        end_line: source.lines().count().max(1),
        ..Default::default()
    };

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let Some((def, decorator_line)) = definition(child) else {
            continue;
        };
        let construct = match def.kind() {
            "class_definition" => describe_class(def, decorator_line, source),
            _ => describe_function(def, decorator_line, None, source),
        };
        module.children.push(construct);
    }

    Ok(module)
}

fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| Error::Parser(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| Error::Parser("parsing was cancelled".to_string()))
}

/// Unwrap a (possibly decorated) class or function definition.
fn definition(node: Node) -> Option<(Node, Option<usize>)> {
    match node.kind() {
        "function_definition" | "class_definition" => Some((node, None)),
        "decorated_definition" => node
            .child_by_field_name("definition")
            .map(|def| (def, Some(start_line(node)))),
        _ => None,
    }
}

fn describe_class(node: Node, decorator_line: Option<usize>, source: &str) -> ConstructDescriptor {
    let name = field_text(node, "name", source).unwrap_or_default();
    let mut class = ConstructDescriptor {
        kind: ConstructKind::Class,
        name,
        line: start_line(node),
        end_line: end_line(node),
        decorator_line,
        ..Default::default()
    };

    let Some(body) = node.child_by_field_name("body") else {
        return class;
    };

    let mut cursor = body.walk();
    for stmt in body.named_children(&mut cursor) {
        if stmt.kind() == "expression_statement" {
            if let Some((field, annotation)) = annotated_field(stmt, source) {
                class.fields.insert(field, annotation);
            }
            continue;
        }
        match definition(stmt) {
            Some((def, decorator_line)) if def.kind() == "function_definition" => {
                let method = describe_function(def, decorator_line, Some(&class.name), source);
                class.children.push(method);
            }
            _ => {}
        }
    }

    class
}

fn describe_function(
    node: Node,
    decorator_line: Option<usize>,
    parent: Option<&str>,
    source: &str,
) -> ConstructDescriptor {
    let mut params = parameters(node, source);
    if parent.is_some() {
        let is_receiver = params
            .first()
            .is_some_and(|p| RECEIVERS.contains(&p.name.as_str()));
        if is_receiver {
            params.remove(0);
        }
    }

    ConstructDescriptor {
        kind: if parent.is_some() {
            ConstructKind::Method
        } else {
            ConstructKind::Function
        },
        name: field_text(node, "name", source).unwrap_or_default(),
        line: start_line(node),
        end_line: end_line(node),
        decorator_line,
        parent: parent.map(str::to_string),
        params,
        return_type: field_text(node, "return_type", source),
        ..Default::default()
    }
}

fn parameters(node: Node, source: &str) -> Vec<Param> {
    let Some(list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|p| parameter(p, source))
        .collect()
}

fn parameter(node: Node, source: &str) -> Option<Param> {
    match node.kind() {
        "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" | "tuple_pattern" => {
            Some(Param::new(text(node, source)))
        }
        "typed_parameter" => {
            // The name is the leading identifier or splat pattern; only `type` is a field.
            let name = node.named_child(0)?;
            Some(Param {
                name: text(name, source).to_string(),
                annotation: field_text(node, "type", source),
                default: None,
            })
        }
        "default_parameter" | "typed_default_parameter" => Some(Param {
            name: field_text(node, "name", source)?,
            annotation: field_text(node, "type", source),
            default: field_text(node, "value", source),
        }),
        // `*` / `/` separators and comments
        _ => None,
    }
}

/// `name: T` or `name: T = value` directly in a class body.
fn annotated_field(stmt: Node, source: &str) -> Option<(String, String)> {
    let assignment = stmt.named_child(0)?;
    if assignment.kind() != "assignment" {
        return None;
    }
    let left = assignment.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }
    let annotation = field_text(assignment, "type", source)?;
    Some((text(left, source).to_string(), annotation))
}

fn syntax_error(root: Node, source: &str) -> Error {
    let (line, column, message) = match first_error(root) {
        Some(node) => {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                let snippet = text(node, source).lines().next().unwrap_or("").trim();
                if snippet.is_empty() {
                    "invalid syntax".to_string()
                } else {
                    format!("unexpected `{}`", truncate(snippet, 40))
                }
            };
            (position.row + 1, position.column + 1, message)
        }
        None => (1, 1, "invalid syntax".to_string()),
    };

    Error::Syntax {
        path: PathBuf::from(SOURCE_PLACEHOLDER),
        line,
        column,
        message,
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|child| text(child, source).to_string())
}

fn start_line(node: Node) -> usize {
    node.start_position().row + 1
}

fn end_line(node: Node) -> usize {
    let end = node.end_position();
    // A node ending at column 0 stops before that row's first byte.
    if end.column == 0 && end.row > node.start_position().row {
        end.row
    } else {
        end.row + 1
    }
}
