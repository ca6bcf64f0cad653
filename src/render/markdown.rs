//! GitHub-flavored markdown renderer.
//!
//! Layout: a module heading and description, an index when the module has
//! more than one construct, then `## Classes` and `## Functions` in
//! declaration order.

use crate::error::Result;
use crate::model::{ConstructKind, DocItem, Param};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, module: &str, items: &[DocItem]) -> Result<String> {
        let mut lines: Vec<String> = vec![format!("# Module {}", module), String::new()];

        let constructs: Vec<&DocItem> = items
            .iter()
            .filter(|item| item.kind != ConstructKind::Module)
            .collect();

        if let Some(module_item) = items.iter().find(|i| i.kind == ConstructKind::Module) {
            push_paragraph(&mut lines, &module_item.doc.description);
        }

        let classes: Vec<&DocItem> = constructs
            .iter()
            .copied()
            .filter(|i| i.kind == ConstructKind::Class)
            .collect();
        let functions: Vec<&DocItem> = constructs
            .iter()
            .copied()
            .filter(|i| i.kind != ConstructKind::Class)
            .collect();

        if constructs.len() > 1 {
            lines.push("## Index".to_string());
            lines.push(String::new());
            for item in classes.iter().chain(functions.iter()) {
                lines.push(toc_item(&heading(item)));
            }
            lines.push(String::new());
        }

        if !classes.is_empty() {
            lines.push("## Classes".to_string());
            lines.push(String::new());
            for class in &classes {
                render_class(&mut lines, class);
            }
        }

        if !functions.is_empty() {
            lines.push("## Functions".to_string());
            lines.push(String::new());
            for func in &functions {
                render_callable(&mut lines, func, "###");
            }
        }

        let mut out = lines.join("\n").trim_end().to_string();
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn heading(item: &DocItem) -> String {
    match item.kind {
        ConstructKind::Class => format!("class {}", item.name),
        _ => item.name.clone(),
    }
}

fn render_class(lines: &mut Vec<String>, class: &DocItem) {
    lines.push(format!("### {}", heading(class)));
    lines.push(String::new());
    push_paragraph(lines, &class.doc.description);

    if !class.fields.is_empty() {
        lines.push("#### Fields".to_string());
        lines.push(String::new());
        for (name, annotation) in &class.fields {
            lines.push(format!("- **{}**: `{}`", name, annotation));
        }
        lines.push(String::new());
    }

    if !class.methods.is_empty() {
        lines.push("#### Methods".to_string());
        lines.push(String::new());
        for method in &class.methods {
            render_callable(lines, method, "#####");
        }
    }
}

/// Signature, description, then the documented sections of a function or
/// method.
fn render_callable(lines: &mut Vec<String>, item: &DocItem, level: &str) {
    lines.push(format!("{} {}", level, item.name));
    lines.push(String::new());
    lines.push("```python".to_string());
    lines.push(signature(item));
    lines.push("```".to_string());
    lines.push(String::new());
    push_paragraph(lines, &item.doc.description);

    let arguments = arguments(item);
    if !arguments.is_empty() {
        lines.push("**Arguments**".to_string());
        lines.push(String::new());
        lines.extend(arguments);
        lines.push(String::new());
    }

    let returns = item.doc.returns.as_str();
    if !returns.is_empty() || item.return_type.is_some() {
        lines.push("**Returns**".to_string());
        lines.push(String::new());
        lines.push(match (&item.return_type, returns.is_empty()) {
            (Some(ty), true) => format!("- `{}`", ty),
            (Some(ty), false) => format!("- `{}`: {}", ty, indent_continuation(returns)),
            (None, _) => format!("- {}", indent_continuation(returns)),
        });
        lines.push(String::new());
    }

    if !item.doc.raises.is_empty() {
        lines.push("**Raises**".to_string());
        lines.push(String::new());
        for (name, desc) in &item.doc.raises {
            lines.push(match (name.is_empty(), desc.is_empty()) {
                (true, _) => format!("- {}", indent_continuation(desc)),
                (false, true) => format!("- **{}**", name),
                (false, false) => format!("- **{}**: {}", name, indent_continuation(desc)),
            });
        }
        lines.push(String::new());
    }
}

/// `def name(a: int = 1, *args) -> bool`
fn signature(item: &DocItem) -> String {
    let params: Vec<String> = item.params.iter().map(param_source).collect();
    let mut sig = format!("def {}({})", item.name, params.join(", "));
    if let Some(ref ret) = item.return_type {
        sig.push_str(" -> ");
        sig.push_str(ret);
    }
    sig
}

fn param_source(param: &Param) -> String {
    let mut out = param.name.clone();
    if let Some(ref annotation) = param.annotation {
        out.push_str(": ");
        out.push_str(annotation);
    }
    if let Some(ref default) = param.default {
        out.push_str(if param.annotation.is_some() { " = " } else { "=" });
        out.push_str(default);
    }
    out
}

/// Declared parameters merged with their documented descriptions, followed
/// by documented names that match no declared parameter.
fn arguments(item: &DocItem) -> Vec<String> {
    let mut out = Vec::new();
    let mut matched: Vec<&str> = Vec::new();

    for param in &item.params {
        let documented = item
            .doc
            .params
            .get_key_value(param.name.as_str())
            .or_else(|| item.doc.params.get_key_value(bare_name(&param.name)));
        if let Some((key, _)) = documented {
            matched.push(key.as_str());
        }
        let desc = documented.map(|(_, d)| d.as_str()).unwrap_or("");
        let mut line = format!("- **{}**", escape_name(&param.name));
        if let Some(ref annotation) = param.annotation {
            line.push_str(&format!(" (`{}`)", annotation));
        }
        if !desc.is_empty() {
            line.push_str(": ");
            line.push_str(&indent_continuation(desc));
        }
        out.push(line);
    }

    for (name, desc) in &item.doc.params {
        if matched.contains(&name.as_str()) {
            continue;
        }
        if desc.is_empty() {
            out.push(format!("- **{}**", escape_name(name)));
        } else {
            out.push(format!("- **{}**: {}", escape_name(name), indent_continuation(desc)));
        }
    }

    out
}

/// `*args` / `**kwargs` without their sigils.
fn bare_name(name: &str) -> &str {
    name.trim_start_matches('*')
}

/// Escape the `*` of `*args` / `**kwargs` so it is not read as emphasis.
fn escape_name(name: &str) -> String {
    name.replace('*', "\\*")
}

/// Keep paragraph breaks inside a list item.
fn indent_continuation(text: &str) -> String {
    text.replace('\n', "\n  ")
}

fn push_paragraph(lines: &mut Vec<String>, text: &str) {
    if !text.is_empty() {
        lines.push(text.to_string());
        lines.push(String::new());
    }
}

// -- Index --------------------------------------------------------------------

fn toc_item(title: &str) -> String {
    format!("* [{}](#{})", title, github_slug(title))
}

/// GitHub heading anchor: lowercase, drop everything but word characters,
/// spaces and hyphens, then turn spaces into hyphens.
fn github_slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c == ' ' || c == '-')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}
