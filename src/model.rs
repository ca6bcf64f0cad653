//! Data model for extracted documentation, independent of the output format.

use indexmap::IndexMap;
use serde::Serialize;

/// A contiguous run of `#/` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Line contents with the marker and one following space removed
    pub lines: Vec<String>,
    /// 1-based line of the first marker line
    pub start_line: usize,
    /// 1-based line of the last marker line
    pub end_line: usize,
}

impl CommentBlock {
    /// Block text as seen by the section parsers.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Reinsert the marker, reproducing the trimmed source lines.
    pub fn source_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| format!("{} {}", crate::extract::MARKER, line).trim_end().to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    #[default]
    Module,
    Class,
    Function,
    Method,
}

impl ConstructKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructKind::Module => "module",
            ConstructKind::Class => "class",
            ConstructKind::Function => "function",
            ConstructKind::Method => "method",
        }
    }
}

/// A declared parameter of a function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }
}

/// A construct found by the structure walker.
///
/// The module descriptor owns the top-level classes and functions through
/// `children`; a class descriptor owns its methods the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstructDescriptor {
    pub kind: ConstructKind,
    pub name: String,
    /// Line of the `def`/`class` keyword (1 for the module)
    pub line: usize,
    /// Last line of the construct's body
    pub end_line: usize,
    /// First decorator line, when the construct is decorated
    pub decorator_line: Option<usize>,
    /// Name of the owning class, for methods
    pub parent: Option<String>,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    /// Annotated class-body assignments: name → annotation
    pub fields: IndexMap<String, String>,
    pub children: Vec<ConstructDescriptor>,
}

impl ConstructDescriptor {
    /// First line belonging to the construct, decorators included.
    pub fn lead_line(&self) -> usize {
        self.decorator_line.unwrap_or(self.line)
    }
}

/// Structured documentation parsed out of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocRecord {
    pub description: String,
    /// Documented parameters in the order they were written
    pub params: IndexMap<String, String>,
    pub returns: String,
    /// (condition, description) in the order they were written
    pub raises: Vec<(String, String)>,
}

impl DocRecord {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.params.is_empty()
            && self.returns.is_empty()
            && self.raises.is_empty()
    }
}

/// A construct merged with its documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocItem {
    pub kind: ConstructKind,
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, String>,
    /// Joined block text before section parsing
    pub raw_doc: String,
    pub doc: DocRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<DocItem>,
}

impl DocItem {
    pub fn is_documented(&self) -> bool {
        !self.raw_doc.is_empty()
    }
}
