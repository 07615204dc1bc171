//! # Line Classification
//!
//! Decides whether a single source line opens a documentable construct.
//! Classification is an ordered list of independent declaration patterns, not
//! a grammar: class/interface/enum is tested before method, method before
//! property. Lines that match nothing fall through to `None`; ambiguous or
//! malformed input is never an error at this layer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::ElementKind;

/// Class, interface, and enum declarations: optional visibility, any
/// combination of `static`/`abstract`/`sealed`/`partial`, then the keyword
/// that decides the kind.
static CLASS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:public|private|protected|internal)\s+)?(?:(?:static|abstract|sealed|partial)\s+)*(class|interface|enum)\s+(\w+)",
    )
    .expect("Invalid class declaration regex")
});

/// Method signatures: optional visibility and modifiers, a return-type token
/// (generics and array brackets allowed), an identifier, an opening paren.
/// Purely lexical, so `return Foo(` on its own line also matches; the
/// whole-buffer scan additionally filters on trailing semicolons.
static METHOD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:public|private|protected|internal)\s+)?(?:(?:static|virtual|override|async)\s+)*[\w<>\[\]]+\s+(\w+)\s*\(",
    )
    .expect("Invalid method declaration regex")
});

/// Auto-property declarations with an accessor on the same line. Checked
/// last so accessor-bearing lines are never reported as methods.
static PROPERTY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:public|private|protected|internal)\s+)?(?:(?:static|virtual|override)\s+)*[\w<>\[\]]+\s+(\w+)\s*\{\s*(?:get|set)",
    )
    .expect("Invalid property declaration regex")
});

/// Identifier extraction for method lines: the first word followed by an
/// opening paren.
static METHOD_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+(\w+)\s*\(").expect("Invalid method name regex"));

/// Classifies one line. Each line matches at most one kind; the patterns are
/// order-sensitive and mutually exclusive by construction.
pub fn classify(line: &str) -> Option<ElementKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(captures) = CLASS_REGEX.captures(trimmed) {
        return Some(match &captures[1] {
            "interface" => ElementKind::Interface,
            "enum" => ElementKind::Enum,
            _ => ElementKind::Class,
        });
    }
    if METHOD_REGEX.is_match(trimmed) {
        return Some(ElementKind::Method);
    }
    if PROPERTY_REGEX.is_match(trimmed) {
        return Some(ElementKind::Property);
    }
    None
}

/// Best-effort identifier extraction for an already classified line.
/// Falls back to `"Unknown"` instead of failing, e.g. for generic methods
/// whose name token carries type parameters.
pub fn extract_name(line: &str, kind: ElementKind) -> String {
    let trimmed = line.trim();
    let captured = match kind {
        ElementKind::Class | ElementKind::Interface | ElementKind::Enum => {
            CLASS_REGEX.captures(trimmed).and_then(|caps| caps.get(2))
        }
        ElementKind::Method => METHOD_NAME_REGEX
            .captures(trimmed)
            .and_then(|caps| caps.get(1)),
        ElementKind::Property => PROPERTY_REGEX
            .captures(trimmed)
            .and_then(|caps| caps.get(1)),
    };
    captured.map_or_else(|| "Unknown".to_string(), |m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_class_family_declarations() {
        assert_eq!(classify("public class UserService"), Some(ElementKind::Class));
        assert_eq!(
            classify("    internal static class Extensions"),
            Some(ElementKind::Class)
        );
        assert_eq!(
            classify("public abstract partial class Repository<T> : IRepository"),
            Some(ElementKind::Class)
        );
        assert_eq!(
            classify("public interface IUserService"),
            Some(ElementKind::Interface)
        );
        assert_eq!(classify("enum Color"), Some(ElementKind::Enum));
        assert_eq!(classify("public enum Status { Active, Inactive }"), Some(ElementKind::Enum));
    }

    #[test]
    fn test_classifies_method_signatures() {
        assert_eq!(classify("public void Process()"), Some(ElementKind::Method));
        assert_eq!(
            classify("    private static async Task<User> GetUserAsync(int id)"),
            Some(ElementKind::Method)
        );
        assert_eq!(
            classify("Task<User> GetByIdAsync(int id);"),
            Some(ElementKind::Method)
        );
        assert_eq!(
            classify("protected override string[] Split(string input)"),
            Some(ElementKind::Method)
        );
    }

    #[test]
    fn test_classifies_auto_properties() {
        assert_eq!(
            classify("public int Id { get; set; }"),
            Some(ElementKind::Property)
        );
        assert_eq!(
            classify("    public List<string> Items { get; }"),
            Some(ElementKind::Property)
        );
    }

    #[test]
    fn test_rejects_non_declarations() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("    var total = Compute(a, b);"), None);
        assert_eq!(classify("{"), None);
        assert_eq!(classify("}"), None);
        assert_eq!(classify("// public class NotReal"), None);
        assert_eq!(classify("/// <summary>"), None);
        assert_eq!(classify("using System;"), None);
        assert_eq!(classify("namespace Acme.Billing"), None);
    }

    #[test]
    fn test_extracts_names() {
        assert_eq!(
            extract_name("public class UserService", ElementKind::Class),
            "UserService"
        );
        assert_eq!(
            extract_name("public interface IUserService", ElementKind::Interface),
            "IUserService"
        );
        assert_eq!(extract_name("enum Color", ElementKind::Enum), "Color");
        assert_eq!(
            extract_name("    public void Process(int x)", ElementKind::Method),
            "Process"
        );
        assert_eq!(
            extract_name("public int Id { get; set; }", ElementKind::Property),
            "Id"
        );
    }

    #[test]
    fn test_name_extraction_falls_back_to_unknown() {
        // Generic methods carry type parameters in the name token, which the
        // line-oriented pattern does not attempt to parse.
        assert_eq!(
            extract_name("public T Map<T>(T input)", ElementKind::Method),
            "Unknown"
        );
    }
}
