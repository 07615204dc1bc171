//! Builds the instruction prompt for one element. The prompt carries the
//! element's source text, the per-kind format example, and the requirements
//! list; the model is told to return only the docstring so nothing else has
//! to be parsed out of the response.

use crate::element::ElementKind;
use crate::language::LanguageProfile;
use crate::templates::doc_template;

pub fn build_prompt(profile: &LanguageProfile, kind: ElementKind, snippet: &str) -> String {
    let template = doc_template(profile, kind);
    format!(
        "Generate a {language} docstring for this {kind}:\n\n{snippet}\n\nUse this format:\n{template}\n\nRequirements:\n- Write a clear, concise summary\n- Document all parameters with types and descriptions\n- Document the return value\n- Include any exceptions that might be thrown\n- Follow Microsoft style guidelines\n- Be accurate and helpful\n\nReturn only the docstring, no additional text.",
        language = profile.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::CSHARP;

    #[test]
    fn test_prompt_contains_snippet_template_and_kind() {
        let prompt = build_prompt(&CSHARP, ElementKind::Method, "public void Foo() {}");
        assert!(prompt.starts_with("Generate a csharp docstring for this method:"));
        assert!(prompt.contains("public void Foo() {}"));
        assert!(prompt.contains("<param name=\"paramName\">"));
        assert!(prompt.ends_with("Return only the docstring, no additional text."));
    }

    #[test]
    fn test_class_prompt_uses_the_class_template() {
        let prompt = build_prompt(&CSHARP, ElementKind::Class, "public class A");
        assert!(prompt.contains("Brief description of the class and its purpose."));
        assert!(!prompt.contains("<returns>"));
    }
}
