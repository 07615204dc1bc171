use std::path::Path;

/// Lexical facts about one supported language: how its documentation
/// comments look and which files it owns. The scanner and doc-block detector
/// are parameterized over this table instead of hardcoding C# syntax, so new
/// languages are added here (plus templates) without touching the scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub extensions: &'static [&'static str],
    /// Line prefix that marks a structured documentation comment, as opposed
    /// to an ordinary comment (`///` vs `//` in C#).
    pub doc_marker: &'static str,
    /// Closing tag that is evidence of a multi-line documentation block even
    /// when the line above an element is a continuation line.
    pub doc_close_tag: &'static str,
    pub line_comment: &'static str,
    pub block_comment: (&'static str, &'static str),
}

pub const CSHARP: LanguageProfile = LanguageProfile {
    id: "csharp",
    display_name: "C#",
    extensions: &["cs"],
    doc_marker: "///",
    doc_close_tag: "</summary>",
    line_comment: "//",
    block_comment: ("/*", "*/"),
};

const PROFILES: &[LanguageProfile] = &[CSHARP];

pub fn profile_for(id: &str) -> Option<&'static LanguageProfile> {
    PROFILES.iter().find(|profile| profile.id.eq_ignore_ascii_case(id))
}

pub fn profile_for_path(path: &Path) -> Option<&'static LanguageProfile> {
    let extension = path.extension()?.to_str()?;
    PROFILES.iter().find(|profile| {
        profile
            .extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_up_profiles_by_id_and_extension() {
        assert_eq!(profile_for("csharp").map(|p| p.id), Some("csharp"));
        assert_eq!(profile_for("CSharp").map(|p| p.id), Some("csharp"));
        assert!(profile_for("cobol").is_none());

        assert_eq!(
            profile_for_path(Path::new("src/Services/UserService.cs")).map(|p| p.id),
            Some("csharp")
        );
        assert!(profile_for_path(Path::new("readme.md")).is_none());
        assert!(profile_for_path(Path::new("Makefile")).is_none());
    }
}
