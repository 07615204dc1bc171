use console::style;
use similar::{DiffTag, TextDiff};

const CONTEXT_LINES: usize = 2;

/// Renders a colorized, line-numbered diff between the buffer as loaded and
/// the buffer after the planned edits. Used by dry-run mode instead of
/// writing the file.
pub fn render_diff(old_lines: &[String], new_lines: &[String]) -> String {
    if old_lines == new_lines {
        return "No changes detected.".to_string();
    }

    let old_content: Vec<&str> = old_lines.iter().map(String::as_str).collect();
    let new_content: Vec<&str> = new_lines.iter().map(String::as_str).collect();
    let diff = TextDiff::from_slices(&old_content, &new_content);

    let mut rendered = Vec::new();
    for (hunk_index, group) in diff.grouped_ops(CONTEXT_LINES).iter().enumerate() {
        if hunk_index > 0 {
            rendered.push("...".to_string());
        }
        for op in group {
            match op.tag() {
                DiffTag::Replace => {
                    for index in op.old_range() {
                        rendered.push(
                            style(format!("- {:>4}: {}", index + 1, old_content[index]))
                                .red()
                                .to_string(),
                        );
                    }
                    for index in op.new_range() {
                        rendered.push(
                            style(format!("+ {:>4}: {}", index + 1, new_content[index]))
                                .green()
                                .to_string(),
                        );
                    }
                }
                DiffTag::Delete => {
                    for index in op.old_range() {
                        rendered.push(
                            style(format!("- {:>4}: {}", index + 1, old_content[index]))
                                .red()
                                .to_string(),
                        );
                    }
                }
                DiffTag::Insert => {
                    for index in op.new_range() {
                        rendered.push(
                            style(format!("+ {:>4}: {}", index + 1, new_content[index]))
                                .green()
                                .to_string(),
                        );
                    }
                }
                DiffTag::Equal => {
                    for index in op.new_range() {
                        rendered.push(format!("  {:>4}: {}", index + 1, new_content[index]));
                    }
                }
            }
        }
    }
    rendered.join("\n")
}
