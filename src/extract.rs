//! `#/` comment extraction: line-by-line grouping into blocks.

use crate::model::CommentBlock;

/// Documentation marker. Fixed, not configurable.
pub const MARKER: &str = "#/";

/// Content of a marker line, or `None` for any other line.
///
/// Strips surrounding whitespace, the marker, and at most one space after it.
pub fn marker_content(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(MARKER)?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Collect contiguous runs of marker lines into blocks, in file order.
///
/// Any non-marker line, blank lines included, closes the open block.
pub fn extract(source: &str) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CommentBlock> = None;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        match marker_content(line) {
            Some(content) => match current {
                Some(ref mut block) => {
                    block.lines.push(content.to_string());
                    block.end_line = line_no;
                }
                None => {
                    current = Some(CommentBlock {
                        lines: vec![content.to_string()],
                        start_line: line_no,
                        end_line: line_no,
                    });
                }
            },
            None => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(extract("").is_empty());
        assert!(extract("x = 1\n\n# plain comment\n").is_empty());
    }

    #[test]
    fn groups_contiguous_lines() {
        let input = "#/ Module docs.\n#/ Second line.\n\nimport os\n\n#/ Function docs.\ndef f():\n    pass\n";
        let blocks = extract(input);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines, vec!["Module docs.", "Second line."]);
        assert_eq!((blocks[0].start_line, blocks[0].end_line), (1, 2));
        assert_eq!(blocks[1].lines, vec!["Function docs."]);
        assert_eq!((blocks[1].start_line, blocks[1].end_line), (6, 6));
    }

    #[test]
    fn blank_line_splits_blocks() {
        let blocks = extract("#/ one\n\n#/ two\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].start_line, 3);
    }

    #[test]
    fn strips_only_one_space() {
        let blocks = extract("    #/     a: first\n#/x\n#/\n");
        assert_eq!(blocks[0].lines, vec!["    a: first", "x", ""]);
    }

    #[test]
    fn indented_markers_are_collected() {
        let input = "class A:\n    #/ Method docs.\n    def m(self):\n        pass\n";
        let blocks = extract(input);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_line, 2);
    }

    #[test]
    fn plain_comment_is_not_a_marker() {
        assert_eq!(marker_content("# not docs"), None);
        assert_eq!(marker_content("  #/ docs  "), Some("docs"));
    }

    #[test]
    fn source_lines_round_trip() {
        let input = "#/ Does X.\n#/\n#/   indented\n";
        let blocks = extract(input);
        let original: Vec<&str> = input.lines().map(str::trim).collect();
        assert_eq!(blocks[0].source_lines(), original);
    }
}
