//! NumPy style: section titles underlined with dashes, `name : type` heads
//! with indented descriptions below them.

use super::{description, indent_of, Paragraphs};
use crate::model::DocRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Params,
    Returns,
    Raises,
    /// An underlined title we do not know; its lines fold into the description.
    Other,
}

fn known_section(title: &str) -> Section {
    match title {
        "Parameters" | "Other Parameters" => Section::Params,
        "Returns" => Section::Returns,
        "Raises" => Section::Raises,
        _ => Section::Other,
    }
}

/// True when `underline` is a run of dashes at least as long as `title`.
fn is_underlined(title: &str, underline: &str) -> bool {
    let title = title.trim();
    let underline = underline.trim();
    !title.is_empty()
        && !underline.is_empty()
        && underline.chars().all(|c| c == '-')
        && underline.chars().count() >= title.chars().count()
}

/// A head line and the description lines indented under it.
struct Entry {
    head: String,
    body: Paragraphs,
}

/// Parse NumPy-style text into a record.
pub fn parse(text: &str) -> DocRecord {
    let lines: Vec<&str> = text.lines().collect();

    let mut section = Section::Description;
    let mut lead: Vec<&str> = Vec::new();
    let mut stray: Vec<&str> = Vec::new();
    let mut entries: Vec<Entry> = Vec::new();
    let mut head_indent: Option<usize> = None;
    let mut record = DocRecord::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if i + 1 < lines.len() && is_underlined(line, lines[i + 1]) {
            close_section(section, &mut entries, &mut record);
            section = known_section(line.trim());
            head_indent = None;
            if section == Section::Other {
                stray.push(line);
                stray.push(lines[i + 1]);
            }
            i += 2;
            continue;
        }
        i += 1;

        match section {
            Section::Description => lead.push(line),
            Section::Other => stray.push(line),
            Section::Params | Section::Returns | Section::Raises => {
                if line.trim().is_empty() {
                    if let Some(entry) = entries.last_mut() {
                        entry.body.push(line);
                    }
                    continue;
                }
                let indent = indent_of(line);
                let base = *head_indent.get_or_insert(indent);
                if indent <= base {
                    head_indent = Some(indent);
                    entries.push(Entry {
                        head: line.trim().to_string(),
                        body: Paragraphs::default(),
                    });
                } else if let Some(entry) = entries.last_mut() {
                    entry.body.push(line);
                } else {
                    stray.push(line);
                }
            }
        }
    }

    close_section(section, &mut entries, &mut record);
    record.description = description(&lead, &stray);
    record
}

/// Turn the entries gathered for `section` into record fields.
fn close_section(section: Section, entries: &mut Vec<Entry>, record: &mut DocRecord) {
    let drained = std::mem::take(entries);
    match section {
        Section::Params => {
            for entry in drained {
                let text = entry.body.finish();
                // `x, y : int` documents both names.
                let names = entry.head.split(':').next().unwrap_or_default();
                for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                    record.params.insert(name.to_string(), text.clone());
                }
            }
        }
        Section::Raises => {
            for entry in drained {
                let name = entry.head.split(':').next().unwrap_or_default().trim();
                record.raises.push((name.to_string(), entry.body.finish()));
            }
        }
        Section::Returns => {
            let rendered: Vec<String> = drained
                .into_iter()
                .map(|entry| {
                    if entry.body.is_empty() {
                        entry.head
                    } else {
                        format!("{}: {}", entry.head, entry.body.finish())
                    }
                })
                .collect();
            let mut returns = std::mem::take(&mut record.returns);
            for part in rendered {
                if !returns.is_empty() {
                    returns.push('\n');
                }
                returns.push_str(&part);
            }
            record.returns = returns;
        }
        Section::Description | Section::Other => {}
    }
}
