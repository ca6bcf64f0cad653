//! Sphinx style: `:param name:`, `:returns:` and `:raises Name:` field
//! markers at the start of a line.

use super::{description, Paragraphs};
use crate::model::DocRecord;
use regex::Regex;
use std::sync::LazyLock;

// `:field:`, `:field arg:` or `:field type arg:` then the field text.
static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([A-Za-z]+)(?:\s+([^:]+?))?\s*:(?:\s+(.*)|$)").unwrap());

/// Where continuation lines currently go.
enum Target {
    Description,
    Param(usize),
    Returns,
    Raise(usize),
    /// `:type:` / `:rtype:` text is recognized but not kept.
    Discard,
}

/// Parse Sphinx-style text into a record.
pub fn parse(text: &str) -> DocRecord {
    let mut record = DocRecord::default();
    let mut lead: Vec<&str> = Vec::new();
    let mut params: Vec<(String, Paragraphs)> = Vec::new();
    let mut raises: Vec<(String, Paragraphs)> = Vec::new();
    let mut returns = Paragraphs::default();
    let mut target = Target::Description;

    for line in text.lines() {
        let field = RE_FIELD.captures(line.trim()).and_then(|caps| {
            let kind = field_kind(&caps[1])?;
            let arg = caps.get(2).map(|m| m.as_str().trim().to_string());
            let body = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            Some((kind, arg, body))
        });

        let Some((kind, arg, body)) = field else {
            match target {
                Target::Description => lead.push(line),
                Target::Param(idx) => params[idx].1.push(line),
                Target::Returns => returns.push(line),
                Target::Raise(idx) => raises[idx].1.push(line),
                Target::Discard => {}
            }
            continue;
        };

        target = match kind {
            FieldKind::Param => {
                // `:param int a:` names `a`
                let name = arg
                    .as_deref()
                    .and_then(|a| a.split_whitespace().last())
                    .unwrap_or_default()
                    .to_string();
                let mut text = Paragraphs::default();
                text.push(body);
                params.push((name, text));
                Target::Param(params.len() - 1)
            }
            FieldKind::Returns => {
                returns.push(body);
                Target::Returns
            }
            FieldKind::Raises => {
                let mut text = Paragraphs::default();
                text.push(body);
                raises.push((arg.unwrap_or_default(), text));
                Target::Raise(raises.len() - 1)
            }
            FieldKind::Type => Target::Discard,
        };
    }

    for (name, text) in params {
        record.params.insert(name, text.finish());
    }
    record.raises = raises
        .into_iter()
        .map(|(name, text)| (name, text.finish()))
        .collect();
    record.returns = returns.finish();
    record.description = description(&lead, &[]);
    record
}

enum FieldKind {
    Param,
    Returns,
    Raises,
    Type,
}

fn field_kind(name: &str) -> Option<FieldKind> {
    match name {
        "param" | "parameter" | "arg" | "argument" | "key" | "keyword" => Some(FieldKind::Param),
        "returns" | "return" => Some(FieldKind::Returns),
        "raises" | "raise" | "except" | "exception" => Some(FieldKind::Raises),
        "type" | "rtype" => Some(FieldKind::Type),
        _ => None,
    }
}
