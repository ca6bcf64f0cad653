//! Block association: match comment blocks to constructs by line number.
//!
//! A block documents the first construct starting after it, provided only
//! blank lines, plain comments or that construct's own decorators sit in
//! between. Blocks that document nothing are either module documentation
//! (at module level with no construct below, or free-standing) or orphans
//! (attached to a statement ahead of a construct, or inside a body).

use crate::extract::marker_content;
use crate::model::{CommentBlock, ConstructDescriptor};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Result of matching blocks against constructs. Values are block indices.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Association {
    /// Block per construct, keyed by the construct's `def`/`class` line
    pub by_line: HashMap<usize, usize>,
    /// Blocks forming the module documentation, in file order
    pub module_blocks: Vec<usize>,
    /// Blocks that document nothing
    pub orphans: Vec<usize>,
}

impl Association {
    pub fn block_for(&self, construct: &ConstructDescriptor) -> Option<usize> {
        self.by_line.get(&construct.line).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment,
    Marker,
    Code,
}

fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if marker_content(trimmed).is_some() {
        LineKind::Marker
    } else if trimmed.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Code
    }
}

/// Construct start lines in the order association considers them.
struct Target {
    line: usize,
    lead_line: usize,
}

/// Match every block against the constructs owned by `module`.
pub fn associate(
    source: &str,
    blocks: &[CommentBlock],
    module: &ConstructDescriptor,
) -> Association {
    let lines: Vec<&str> = source.lines().collect();
    let kinds: Vec<LineKind> = lines.iter().map(|l| classify(l)).collect();

    let mut targets: Vec<Target> = Vec::new();
    for construct in &module.children {
        targets.push(Target {
            line: construct.line,
            lead_line: construct.lead_line(),
        });
        for method in &construct.children {
            targets.push(Target {
                line: method.line,
                lead_line: method.lead_line(),
            });
        }
    }
    // Stable: on equal lines the earlier-declared construct stays first.
    targets.sort_by_key(|t| t.line);

    let spans: Vec<(usize, usize)> = module
        .children
        .iter()
        .map(|c| (c.lead_line(), c.end_line))
        .collect();

    let mut assoc = Association::default();

    for (idx, block) in blocks.iter().enumerate() {
        let target = targets.iter().find(|t| t.line > block.end_line);

        if let Some(target) = target {
            if gap_is_clear(&kinds, block.end_line + 1, target.lead_line) {
                trace!(
                    block_start = block.start_line,
                    construct_line = target.line,
                    "associated block"
                );
                if let Some(displaced) = assoc.by_line.insert(target.line, idx) {
                    assoc.orphans.push(displaced);
                }
                continue;
            }
        }

        let at_module_level = !starts_indented(&lines, block.start_line)
            && !spans
                .iter()
                .any(|&(start, end)| block.start_line >= start && block.start_line <= end);

        // With no construct left below, only statements follow: module docs.
        // A block cut off from a construct must stand on its own instead.
        let module_doc =
            at_module_level && (target.is_none() || stands_alone(&kinds, block.end_line));

        if module_doc {
            assoc.module_blocks.push(idx);
        } else {
            debug!(
                start = block.start_line,
                end = block.end_line,
                "comment block documents nothing"
            );
            assoc.orphans.push(idx);
        }
    }

    assoc.orphans.sort_unstable();
    assoc
}

/// True when lines `from..to` (1-based, `to` exclusive) hold no code or markers.
fn gap_is_clear(kinds: &[LineKind], from: usize, to: usize) -> bool {
    (from..to).all(|line| {
        matches!(
            kinds.get(line - 1),
            Some(LineKind::Blank | LineKind::Comment) | None
        )
    })
}

fn starts_indented(lines: &[&str], line: usize) -> bool {
    lines
        .get(line - 1)
        .is_some_and(|l| l.starts_with(char::is_whitespace))
}

/// A block stands alone when a blank line or the end of file follows it,
/// looking past plain comments.
fn stands_alone(kinds: &[LineKind], end_line: usize) -> bool {
    for kind in kinds.iter().skip(end_line) {
        match kind {
            LineKind::Comment => continue,
            LineKind::Code => return false,
            LineKind::Blank | LineKind::Marker => return true,
        }
    }
    true
}
