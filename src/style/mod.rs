//! Documentation styles: closed dispatch over the three section grammars.

pub mod google;
pub mod numpy;
pub mod sphinx;

use crate::error::Error;
use crate::model::DocRecord;
use std::fmt;
use std::str::FromStr;

/// Accepted style identifiers.
pub const STYLE_NAMES: &[&str] = &["google", "numpy", "sphinx"];

/// Section grammar applied to every block of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Google,
    Numpy,
    Sphinx,
}

impl Style {
    pub fn name(&self) -> &'static str {
        match self {
            Style::Google => "google",
            Style::Numpy => "numpy",
            Style::Sphinx => "sphinx",
        }
    }

    /// Parse one block's joined text. Never fails; unparsed text lands in
    /// the description.
    pub fn parse(&self, text: &str) -> DocRecord {
        match self {
            Style::Google => google::parse(text),
            Style::Numpy => numpy::parse(text),
            Style::Sphinx => sphinx::parse(text),
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Style::Google),
            "numpy" => Ok(Style::Numpy),
            "sphinx" => Ok(Style::Sphinx),
            other => Err(Error::UnsupportedStyle(other.to_string())),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -- Shared text helpers ------------------------------------------------------

/// Joins continuation lines: one space inside a paragraph, a newline where
/// the source had a blank line.
#[derive(Debug, Default)]
pub(crate) struct Paragraphs {
    text: String,
    pending_break: bool,
}

impl Paragraphs {
    pub(crate) fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            if !self.text.is_empty() {
                self.pending_break = true;
            }
            return;
        }
        if !self.text.is_empty() {
            self.text.push(if self.pending_break { '\n' } else { ' ' });
        }
        self.text.push_str(line);
        self.pending_break = false;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

/// Build the description from the leading lines plus any text no section
/// could place, dropping leading and trailing blank lines.
pub(crate) fn description(lead: &[&str], stray: &[&str]) -> String {
    let lead = trim_blank_lines(lead);
    let stray = trim_blank_lines(stray);
    match (lead.is_empty(), stray.is_empty()) {
        (_, true) => lead,
        (true, false) => stray,
        (false, false) => format!("{lead}\n\n{stray}"),
    }
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Leading whitespace width, in characters.
pub(crate) fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
