//! Per-kind documentation format examples embedded in the generation prompt.
//! Keyed by language profile and element kind; anything unknown falls back
//! to a generic comment so the prompt is never empty.

use crate::element::ElementKind;
use crate::language::LanguageProfile;

const CSHARP_METHOD: &str = r#"/// <summary>
/// Brief description of what the method does.
/// </summary>
/// <param name="paramName">Description of parameter.</param>
/// <returns>Description of return value.</returns>
/// <exception cref="ExceptionType">When this exception is thrown.</exception>"#;

const CSHARP_CLASS: &str = r#"/// <summary>
/// Brief description of the class and its purpose.
/// </summary>"#;

const CSHARP_INTERFACE: &str = r#"/// <summary>
/// Defines the contract for interface purpose.
/// </summary>"#;

const CSHARP_ENUM: &str = r#"/// <summary>
/// Brief description of what the enumeration values represent.
/// </summary>"#;

const CSHARP_PROPERTY: &str = r#"/// <summary>
/// Gets or sets the property description.
/// </summary>"#;

const GENERIC: &str = "// TODO: Add documentation";

pub fn doc_template(profile: &LanguageProfile, kind: ElementKind) -> &'static str {
    match profile.id {
        "csharp" => match kind {
            ElementKind::Method => CSHARP_METHOD,
            ElementKind::Class => CSHARP_CLASS,
            ElementKind::Interface => CSHARP_INTERFACE,
            ElementKind::Enum => CSHARP_ENUM,
            ElementKind::Property => CSHARP_PROPERTY,
        },
        _ => GENERIC,
    }
}
