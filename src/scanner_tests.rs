#![cfg(test)]

use crate::element::ElementKind;
use crate::language::CSHARP;
use crate::scanner::{scan_all, scan_at};
use crate::span_extractor::ScanOptions;

fn lines(source: &str) -> Vec<String> {
    source.lines().map(String::from).collect()
}

const SERVICE: &str = r#"using System;

namespace Acme
{
    /// <summary>
    /// Handles user lookups.
    /// </summary>
    public class UserService
    {
        public int RetryCount { get; set; }

        public User FindUser(int id)
        {
            if (id <= 0) {
                throw new ArgumentException();
            }
            return _store.Get(id);
        }

        private static string Normalize(string name)
        {
            return name.Trim();
        }
    }
}
"#;

#[test]
fn test_cursor_resolves_the_method_above() {
    let source = lines(SERVICE);
    // Cursor inside FindUser's body.
    let element = scan_at(&source, 15, &CSHARP, ScanOptions::default()).unwrap();
    assert_eq!(element.kind, ElementKind::Method);
    assert_eq!(element.name, "FindUser");
    assert_eq!(element.start_line, 11);
    assert_eq!(element.end_line, 17);
    assert_eq!(element.indent_column, 8);
    assert!(!element.has_documentation);
}

#[test]
fn test_cursor_on_the_declaration_line_itself() {
    let source = lines("public void Foo() {\n  return;\n}");
    let element = scan_at(&source, 1, &CSHARP, ScanOptions::default()).unwrap();
    assert_eq!(element.kind, ElementKind::Method);
    assert_eq!(element.name, "Foo");
    assert_eq!(element.start_line, 0);
    assert_eq!(element.end_line, 2);
}

#[test]
fn test_cursor_skips_property_lines_to_the_enclosing_class() {
    let source = lines(SERVICE);
    // Cursor on the RetryCount auto-property.
    let element = scan_at(&source, 9, &CSHARP, ScanOptions::default()).unwrap();
    assert_eq!(element.kind, ElementKind::Class);
    assert_eq!(element.name, "UserService");
    assert!(element.has_documentation);
    let block = element.doc_block.unwrap();
    assert_eq!(block.start, 4);
    assert_eq!(block.end, 6);
}

#[test]
fn test_cursor_with_nothing_documentable_above() {
    let source = lines("using System;\n\nint x = 1;");
    assert!(scan_at(&source, 2, &CSHARP, ScanOptions::default()).is_none());
}

#[test]
fn test_cursor_on_empty_buffer() {
    assert!(scan_at(&[], 0, &CSHARP, ScanOptions::default()).is_none());
}

#[test]
fn test_cursor_beyond_the_last_line_clamps() {
    let source = lines("public class Tail");
    let element = scan_at(&source, 99, &CSHARP, ScanOptions::default()).unwrap();
    assert_eq!(element.name, "Tail");
}

#[test]
fn test_cursor_search_stops_at_interface_method_signature() {
    // Bodyless interface members end with a semicolon. The inventory scan
    // filters them out, but the upward cursor search does not: it returns
    // the first declaration it meets.
    let source = lines(
        "public interface IRepo\n{\n    Task<User> GetByIdAsync(int id);\n\n}",
    );
    let element = scan_at(&source, 3, &CSHARP, ScanOptions::default()).unwrap();
    assert_eq!(element.kind, ElementKind::Method);
    assert_eq!(element.name, "GetByIdAsync");
    assert_eq!(element.start_line, 2);
    assert_eq!(element.end_line, 2);
}

#[test]
fn test_inventory_lists_elements_in_buffer_order() {
    let source = lines(SERVICE);
    let elements = scan_all(&source, &CSHARP, ScanOptions::default());
    let summary: Vec<(ElementKind, &str, usize)> = elements
        .iter()
        .map(|e| (e.kind, e.name.as_str(), e.start_line))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ElementKind::Class, "UserService", 7),
            (ElementKind::Property, "RetryCount", 9),
            (ElementKind::Method, "FindUser", 11),
            (ElementKind::Method, "Normalize", 19),
        ]
    );
}

#[test]
fn test_inventory_marks_documented_elements() {
    let source = lines(SERVICE);
    let elements = scan_all(&source, &CSHARP, ScanOptions::default());
    let class = &elements[0];
    assert!(class.has_documentation);
    assert_eq!(class.doc_block.unwrap().start, 4);
    assert!(elements[1..].iter().all(|e| !e.has_documentation));
}

#[test]
fn test_inventory_skips_comment_lines_and_bodyless_declarations() {
    let source = lines(
        "/// public void NotReal()\n// public void AlsoNotReal()\npublic interface IRepo\n{\n    Task<User> GetByIdAsync(int id);\n}",
    );
    let elements = scan_all(&source, &CSHARP, ScanOptions::default());
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind, ElementKind::Interface);
    assert_eq!(elements[0].name, "IRepo");
}

#[test]
fn test_inventory_is_idempotent() {
    let source = lines(SERVICE);
    let first = scan_all(&source, &CSHARP, ScanOptions::default());
    let second = scan_all(&source, &CSHARP, ScanOptions::default());
    assert_eq!(first, second);
}
