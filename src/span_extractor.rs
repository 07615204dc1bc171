//! # Span Extraction
//!
//! Resolves the exact line range a classified element occupies. Methods and
//! properties are delimited by balanced-brace scanning from the declaration
//! line; class-family declarations span only their declaration line, so only
//! the signature is sent as generation context.
//!
//! Counting is character-by-character across the full line text. By default
//! that includes braces embedded in string literals and comments, a known
//! approximation. `ScanOptions::delimiter_context` enables a literal- and
//! comment-aware sub-state so both behaviors stay pinned by tests.

use crate::element::ElementKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Skip delimiters inside string/char literals and comments while
    /// counting. Off by default: the naive count is the documented behavior,
    /// this is the hardened variant.
    pub delimiter_context: bool,
}

/// Where an element ends. `end_column` is the column just past the closing
/// delimiter, or the line length for declaration-only spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub end_line: usize,
    pub end_column: usize,
}

/// Computes the span of the element starting at `start_line`.
///
/// Methods and properties scan forward, incrementing on `{` and decrementing
/// on `}`; the span ends at the first line whose end-of-line count is zero
/// after the count has been positive at least once. Reaching end-of-buffer
/// without that (abstract or interface members, truncated input) degrades to
/// the signature-only span, the line where the parenthesis balance closes,
/// and never raises an error.
pub fn extract_span(
    lines: &[String],
    start_line: usize,
    kind: ElementKind,
    options: ScanOptions,
) -> Span {
    match kind {
        ElementKind::Class | ElementKind::Interface | ElementKind::Enum => Span {
            end_line: start_line,
            end_column: lines[start_line].len(),
        },
        ElementKind::Method | ElementKind::Property => {
            balanced_span(lines, start_line, '{', '}', options)
                .unwrap_or_else(|| signature_span(lines, start_line, options))
        }
    }
}

fn balanced_span(
    lines: &[String],
    start_line: usize,
    open: char,
    close: char,
    options: ScanOptions,
) -> Option<Span> {
    let mut scan = DelimiterScan::new(options);
    let mut depth: i32 = 0;
    let mut opened = false;
    for (index, line) in lines.iter().enumerate().skip(start_line) {
        let mut close_column = line.len();
        scan.for_each_code_char(line, |column, ch| {
            if ch == open {
                depth += 1;
                opened = true;
            } else if ch == close {
                depth -= 1;
                if depth == 0 {
                    close_column = column + ch.len_utf8();
                }
            }
        });
        if opened && depth == 0 {
            return Some(Span {
                end_line: index,
                end_column: close_column,
            });
        }
    }
    None
}

/// Fallback for brace-less members: the signature ends where its parenthesis
/// balance closes, or on the start line itself if even the parentheses never
/// balance.
fn signature_span(lines: &[String], start_line: usize, options: ScanOptions) -> Span {
    balanced_span(lines, start_line, '(', ')', options).unwrap_or(Span {
        end_line: start_line,
        end_column: lines[start_line].len(),
    })
}

/// Character filter shared by the brace and paren scans. With
/// `delimiter_context` off every character is visited; with it on, contents
/// of string literals, char literals, `//` comments, and `/* */` comments are
/// skipped. String and char state resets at end of line; block-comment state
/// carries across lines.
struct DelimiterScan {
    options: ScanOptions,
    in_block_comment: bool,
}

impl DelimiterScan {
    fn new(options: ScanOptions) -> Self {
        Self {
            options,
            in_block_comment: false,
        }
    }

    fn for_each_code_char(&mut self, line: &str, mut visit: impl FnMut(usize, char)) {
        if !self.options.delimiter_context {
            for (column, ch) in line.char_indices() {
                visit(column, ch);
            }
            return;
        }
        let mut chars = line.char_indices().peekable();
        let mut in_string = false;
        let mut in_char = false;
        while let Some((column, ch)) = chars.next() {
            if self.in_block_comment {
                if ch == '*' && matches!(chars.peek(), Some(&(_, '/'))) {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }
            if in_string {
                if ch == '\\' {
                    chars.next();
                } else if ch == '"' {
                    in_string = false;
                }
                continue;
            }
            if in_char {
                if ch == '\\' {
                    chars.next();
                } else if ch == '\'' {
                    in_char = false;
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '\'' => in_char = true,
                '/' => match chars.peek() {
                    // Rest of the line is a comment.
                    Some(&(_, '/')) => return,
                    Some(&(_, '*')) => {
                        chars.next();
                        self.in_block_comment = true;
                    }
                    _ => visit(column, ch),
                },
                _ => visit(column, ch),
            }
        }
    }
}
