use serde::Serialize;

/// The closed set of documentable source constructs.
///
/// Adding a kind requires a matching classification pattern in
/// [`crate::classifier`] and a span-extraction rule in
/// [`crate::span_extractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
    Method,
    Property,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Enum => "enum",
            ElementKind::Method => "method",
            ElementKind::Property => "property",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The contiguous run of documentation-comment lines sitting above an
/// element, including any blank separator lines between the block and the
/// element itself. `end` is always `element.start_line - 1`, so deleting the
/// inclusive range removes the separators too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocBlock {
    pub start: usize,
    pub end: usize,
}

/// A classified source element with its resolved span and documentation
/// status. Line indices are zero-based and inclusive; `end_line` covers the
/// brace-balanced body for methods and properties but only the declaration
/// line for class-family kinds.
///
/// `name` is best-effort: identifier extraction that fails yields
/// `"Unknown"` rather than an error, because the scanner must stay usable on
/// malformed or partial source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeElement {
    pub kind: ElementKind,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Leading-whitespace width of the declaration line; generated
    /// documentation is reindented to this column.
    pub indent_column: usize,
    pub has_documentation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_block: Option<DocBlock>,
}

impl CodeElement {
    /// The element's source text, used as generation context.
    pub fn snippet(&self, lines: &[String]) -> String {
        if lines.is_empty() {
            return String::new();
        }
        let end = self.end_line.min(lines.len() - 1);
        lines[self.start_line..=end].join("\n")
    }
}
