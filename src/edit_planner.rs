//! # Batch Edit Planning
//!
//! Turns generated documentation into buffer edits that can be applied as
//! one sequence without any edit invalidating another's line numbers.
//! Inserting top-to-bottom would shift every element below the insertion
//! point, so the plan is ordered by descending position: the bottom-most
//! edit is applied first and everything still pending sits above it,
//! untouched.
//!
//! Replacing an existing block emits a delete over the block's original
//! coordinates. Per element the insert (anchored at the declaration line)
//! sorts above the delete (anchored at the block start, which is strictly
//! higher up), and that order is exactly what keeps sequential application
//! of original-coordinate operations conflict-free.

use crate::element::CodeElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOperation {
    /// Inserts `text` at a position; multi-line text ends with a newline so
    /// the line it was inserted in front of stays intact.
    Insert { at: Position, text: String },
    /// Removes the half-open range `[start, end)`.
    Delete { start: Position, end: Position },
}

impl EditOperation {
    /// Topmost buffer line the operation touches; the sort key.
    fn anchor_line(&self) -> usize {
        match self {
            EditOperation::Insert { at, .. } => at.line,
            EditOperation::Delete { start, .. } => start.line,
        }
    }
}

/// Plans the insertion of `text` above each element, bottom-up. With
/// `replace_existing`, elements that already carry a doc block additionally
/// get a delete covering the old block (including blank separator lines).
/// All coordinates refer to the buffer as it was scanned.
pub fn plan(items: &[(CodeElement, String)], replace_existing: bool) -> Vec<EditOperation> {
    let mut operations = Vec::new();
    for (element, text) in items {
        operations.push(EditOperation::Insert {
            at: Position {
                line: element.start_line,
                column: 0,
            },
            text: reindent(text, element.indent_column),
        });
        if replace_existing {
            if let Some(block) = &element.doc_block {
                operations.push(EditOperation::Delete {
                    start: Position {
                        line: block.start,
                        column: 0,
                    },
                    end: Position {
                        line: element.start_line,
                        column: 0,
                    },
                });
            }
        }
    }
    // Stable sort: ties keep emission order.
    operations.sort_by(|a, b| b.anchor_line().cmp(&a.anchor_line()));
    operations
}

/// Rewrites every line of `text` to sit at `indent_column`, preserving the
/// line structure and ending with a trailing newline. Generated text arrives
/// with whatever indentation the model chose; only the element's own column
/// is authoritative.
fn reindent(text: &str, indent_column: usize) -> String {
    let pad = " ".repeat(indent_column);
    let mut out = String::new();
    for line in text.trim().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&pad);
            out.push_str(trimmed);
            out.push('\n');
        }
    }
    out
}
