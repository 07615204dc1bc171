//! # Documentation Block Detection
//!
//! Answers "does this element already carry documentation?" by walking
//! upward from the line above the element. Blank separator lines are
//! tolerated; ordinary line comments are not documentation. A line
//! containing the profile's closing tag also counts as evidence, covering
//! blocks whose final line is a continuation rather than a marker line.

use crate::element::DocBlock;
use crate::language::LanguageProfile;

/// True when a documentation block immediately precedes `line_index`
/// (allowing blank lines in between).
pub fn has_doc_before(profile: &LanguageProfile, lines: &[String], line_index: usize) -> bool {
    find_doc_block(profile, lines, line_index).is_some()
}

/// Locates the documentation block above `line_index`, if any. The returned
/// range runs from the first marker line down to `line_index - 1`, so it
/// covers any blank separator lines and deleting it removes those too.
pub fn find_doc_block(
    profile: &LanguageProfile,
    lines: &[String],
    line_index: usize,
) -> Option<DocBlock> {
    if line_index == 0 || line_index > lines.len() {
        return None;
    }
    let end = line_index - 1;

    let mut anchor = end;
    while lines[anchor].trim().is_empty() {
        if anchor == 0 {
            return None;
        }
        anchor -= 1;
    }

    let anchor_text = lines[anchor].trim();
    if !anchor_text.starts_with(profile.doc_marker)
        && !anchor_text.contains(profile.doc_close_tag)
    {
        return None;
    }

    let mut start = anchor;
    while start > 0 && lines[start - 1].trim().starts_with(profile.doc_marker) {
        start -= 1;
    }
    Some(DocBlock { start, end })
}
