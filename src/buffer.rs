//! # Document Buffer
//!
//! The in-memory line buffer behind every scan and edit. A file is read
//! once, split into lines, and hashed; all edits run against the buffer and
//! only `save` touches the disk again.
//!
//! ## Guiding Principles
//!
//! 1.  **All-or-nothing edits**: `apply_edits` operates on a clone of the
//!     lines. If any single operation is invalid the original state is
//!     preserved, never left partially modified.
//! 2.  **Stale-file protection**: the SHA-1 content hash recorded at load
//!     time is compared against the on-disk file before writing. A file
//!     that changed underneath the tool is refused, not overwritten.

use anyhow::{Context, Result, bail};
use sha1::{Digest, Sha1};
use std::fs;
use std::path::PathBuf;

use crate::edit_planner::{EditOperation, Position};

#[derive(Debug)]
pub struct DocumentBuffer {
    pub path: PathBuf,
    lines: Vec<String>,
    /// SHA-1 of the content as it was read from disk.
    loaded_hash: String,
    ends_with_newline: bool,
}

impl DocumentBuffer {
    /// Reads `path` and builds the buffer from its content.
    pub fn open(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self::new(path, &content))
    }

    /// Builds a buffer from already loaded content. The trailing-newline flag
    /// is remembered separately so a round trip reproduces the file exactly.
    pub fn new(path: PathBuf, content: &str) -> Self {
        let lines = content.lines().map(String::from).collect();
        Self {
            path,
            lines,
            loaded_hash: calculate_hash(content),
            ends_with_newline: content.ends_with('\n'),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Reconstructs the full content, restoring the original trailing-newline
    /// behavior.
    pub fn full_text(&self) -> String {
        let mut content = self.lines.join("\n");
        if self.ends_with_newline && !self.lines.is_empty() {
            content.push('\n');
        }
        content
    }

    /// Applies every operation in order against a scratch copy of the lines,
    /// then swaps the copy in. A failing operation leaves the buffer exactly
    /// as it was.
    pub fn apply_edits(&mut self, edits: &[EditOperation]) -> Result<()> {
        let mut scratch = self.lines.clone();
        for edit in edits {
            match edit {
                EditOperation::Insert { at, text } => insert_text(&mut scratch, *at, text)?,
                EditOperation::Delete { start, end } => delete_range(&mut scratch, *start, *end)?,
            }
        }
        self.lines = scratch;
        Ok(())
    }

    /// Writes the buffer back to its file, refusing when the on-disk content
    /// no longer matches what was loaded.
    pub fn save(&mut self) -> Result<()> {
        if self.path.exists() {
            let on_disk = fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to re-read file: {}", self.path.display()))?;
            if calculate_hash(&on_disk) != self.loaded_hash {
                bail!(
                    "{} changed on disk since it was read; refusing to overwrite",
                    self.path.display()
                );
            }
        }
        let content = self.full_text();
        fs::write(&self.path, &content)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        self.loaded_hash = calculate_hash(&content);
        Ok(())
    }
}

fn calculate_hash(content: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn insert_text(lines: &mut Vec<String>, at: Position, text: &str) -> Result<()> {
    if at.line >= lines.len() {
        // Appending after the last line is the only position allowed past
        // the end.
        if at.line == lines.len() && at.column == 0 {
            let mut appended: Vec<String> = text.split('\n').map(String::from).collect();
            if text.ends_with('\n') {
                appended.pop();
            }
            lines.extend(appended);
            return Ok(());
        }
        bail!(
            "insert at line {} column {} is outside the buffer ({} lines)",
            at.line,
            at.column,
            lines.len()
        );
    }
    let column = byte_column(&lines[at.line], at.column)?;
    let original = lines.remove(at.line);
    let (prefix, suffix) = original.split_at(column);
    let merged = format!("{prefix}{text}{suffix}");
    lines.splice(at.line..at.line, merged.split('\n').map(String::from));
    Ok(())
}

fn delete_range(lines: &mut Vec<String>, start: Position, end: Position) -> Result<()> {
    if end < start {
        bail!(
            "delete range is inverted: {}:{} to {}:{}",
            start.line,
            start.column,
            end.line,
            end.column
        );
    }
    if start.line >= lines.len() {
        bail!(
            "delete start line {} is outside the buffer ({} lines)",
            start.line,
            lines.len()
        );
    }
    if end.line > lines.len() || (end.line == lines.len() && end.column > 0) {
        bail!(
            "delete end {}:{} is outside the buffer ({} lines)",
            end.line,
            end.column,
            lines.len()
        );
    }

    let start_column = byte_column(&lines[start.line], start.column)?;
    let prefix = lines[start.line][..start_column].to_string();

    // A range ending at (line_count, 0) consumes the last line's newline:
    // the tail is removed outright, not collapsed into an empty line.
    if end.line == lines.len() {
        lines.truncate(start.line);
        if !prefix.is_empty() {
            lines.push(prefix);
        }
        return Ok(());
    }

    let end_column = byte_column(&lines[end.line], end.column)?;
    let suffix = lines[end.line][end_column..].to_string();
    let merged = format!("{prefix}{suffix}");
    lines.splice(start.line..=end.line, std::iter::once(merged));
    Ok(())
}

/// Clamps a column to the line length and rejects positions that fall inside
/// a multi-byte character.
fn byte_column(line: &str, column: usize) -> Result<usize> {
    let clamped = column.min(line.len());
    if !line.is_char_boundary(clamped) {
        bail!("column {column} is not a character boundary");
    }
    Ok(clamped)
}
