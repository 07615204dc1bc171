//! # Element Scanning
//!
//! Orchestrates classification, span extraction, and doc-block detection
//! over a whole buffer or upward from a cursor line. The scanner is pure
//! over a slice of lines and has no knowledge of generation or editing.
//!
//! The two entry points differ on semicolon-terminated method
//! declarations: the whole-buffer inventory excludes them (an interface
//! member has no body to document in batch mode without drowning the list),
//! while the cursor search does not filter them: it returns whatever
//! declaration it meets first on the way up.

use crate::classifier;
use crate::doc_block::find_doc_block;
use crate::element::{CodeElement, ElementKind};
use crate::language::LanguageProfile;
use crate::span_extractor::{extract_span, ScanOptions};

/// Walks upward from `cursor_line` (inclusive) and returns the first line
/// that classifies as a method or class-family declaration. Property matches
/// are passed over: a cursor inside a type should resolve to the enclosing
/// declaration, not a neighboring accessor line. Returns `None` once line 0
/// has been passed without a match; an empty result, not an error.
pub fn scan_at(
    lines: &[String],
    cursor_line: usize,
    profile: &LanguageProfile,
    options: ScanOptions,
) -> Option<CodeElement> {
    let mut index = cursor_line.min(lines.len().checked_sub(1)?);
    loop {
        if let Some(kind) = classifier::classify(&lines[index]) {
            if kind != ElementKind::Property {
                return Some(build_element(lines, index, kind, profile, options));
            }
        }
        if index == 0 {
            return None;
        }
        index -= 1;
    }
}

/// Produces the full element inventory of a buffer, in buffer order. Pure
/// comment lines are never independently classified, and method matches on
/// lines ending with `;` (bodyless interface declarations) are excluded.
/// Scanning an unmodified buffer twice yields identical results.
pub fn scan_all(
    lines: &[String],
    profile: &LanguageProfile,
    options: ScanOptions,
) -> Vec<CodeElement> {
    let mut elements = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if is_comment_line(trimmed, profile) {
            continue;
        }
        let Some(kind) = classifier::classify(line) else {
            continue;
        };
        if kind == ElementKind::Method && trimmed.ends_with(';') {
            continue;
        }
        elements.push(build_element(lines, index, kind, profile, options));
    }
    elements
}

fn build_element(
    lines: &[String],
    start_line: usize,
    kind: ElementKind,
    profile: &LanguageProfile,
    options: ScanOptions,
) -> CodeElement {
    let line = &lines[start_line];
    let span = extract_span(lines, start_line, kind, options);
    let doc_block = find_doc_block(profile, lines, start_line);
    CodeElement {
        kind,
        name: classifier::extract_name(line, kind),
        start_line,
        end_line: span.end_line,
        indent_column: indent_width(line),
        has_documentation: doc_block.is_some(),
        doc_block,
    }
}

fn is_comment_line(trimmed: &str, profile: &LanguageProfile) -> bool {
    trimmed.starts_with(profile.line_comment)
        || trimmed.starts_with(profile.block_comment.0)
        || trimmed.starts_with('*')
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
