//! Google style: `Args:` / `Returns:` / `Raises:` header lines followed by
//! indented `name: description` entries.

use super::{description, indent_of, Paragraphs};
use crate::model::DocRecord;
use regex::Regex;
use std::sync::LazyLock;

// `name: text`, `name (type): text`, `- name: text`; the colon must be
// followed by whitespace or end the line so URLs are not entries.
static RE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-\s+)?(\*{0,2}[A-Za-z_][A-Za-z0-9_.]*)\s*(?:\([^)]*\))?\s*:(?:\s+(.*)|\s*$)")
        .unwrap()
});

// Capitalized words and a colon on their own line: `Example:`, `See Also:`.
static RE_OTHER_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z]*(?: [A-Za-z]+)*:$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Params,
    Returns,
    Raises,
    /// An unrecognized header; its lines fold into the description.
    Other,
}

fn header(line: &str) -> Option<Section> {
    match line.trim() {
        "Args:" | "Arguments:" | "Parameters:" | "Params:" => Some(Section::Params),
        "Returns:" | "Return:" => Some(Section::Returns),
        "Raises:" => Some(Section::Raises),
        _ => None,
    }
}

#[derive(Default)]
struct State<'a> {
    section: Option<Section>,
    header_indent: usize,
    entry_indent: Option<usize>,
    lead: Vec<&'a str>,
    stray: Vec<&'a str>,
    entry: Option<(String, Paragraphs)>,
    returns: Paragraphs,
    record: DocRecord,
}

impl State<'_> {
    fn section(&self) -> Section {
        self.section.unwrap_or(Section::Description)
    }

    /// Move the open entry into the record.
    fn close_entry(&mut self) {
        let Some((name, text)) = self.entry.take() else {
            return;
        };
        match self.section() {
            Section::Params => {
                self.record.params.insert(name, text.finish());
            }
            Section::Raises => self.record.raises.push((name, text.finish())),
            _ => {}
        }
    }
}

/// Parse Google-style text into a record.
pub fn parse(text: &str) -> DocRecord {
    let mut s = State::default();

    for line in text.lines() {
        if let Some(next) = header(line) {
            s.close_entry();
            s.section = Some(next);
            s.header_indent = indent_of(line);
            s.entry_indent = None;
            continue;
        }

        let blank = line.trim().is_empty();
        let indent = indent_of(line);

        // A capitalized `Name:` only opens a new section once it sits left
        // of the current section's entries; at entry depth it is an entry.
        if s.section() != Section::Description
            && s.section() != Section::Other
            && !blank
            && indent <= s.header_indent
            && s.entry_indent.is_some_and(|base| indent < base)
            && RE_OTHER_HEADER.is_match(line.trim())
        {
            s.close_entry();
            s.section = Some(Section::Other);
        }

        match s.section() {
            Section::Description => s.lead.push(line),
            Section::Other => s.stray.push(line),
            Section::Returns => {
                if !blank {
                    s.entry_indent.get_or_insert(indent);
                }
                s.returns.push(line);
            }
            Section::Params | Section::Raises => {
                if blank {
                    if let Some((_, ref mut text)) = s.entry {
                        text.push(line);
                    }
                    continue;
                }

                let base = *s.entry_indent.get_or_insert(indent);
                let deeper = indent > base;

                if !deeper {
                    if let Some(caps) = RE_ENTRY.captures(line.trim()) {
                        s.close_entry();
                        let mut body = Paragraphs::default();
                        if let Some(first) = caps.get(2) {
                            body.push(first.as_str());
                        }
                        s.entry = Some((caps[1].to_string(), body));
                        continue;
                    }
                }

                match s.entry {
                    Some((_, ref mut text)) => text.push(line),
                    None => s.stray.push(line),
                }
            }
        }
    }

    s.close_entry();
    s.record.returns = std::mem::take(&mut s.returns).finish();
    s.record.description = description(&s.lead, &s.stray);
    s.record
}
