//! # Documentation Generation
//!
//! The generation capability behind the documenter, expressed as a trait so
//! the scanning and planning pipeline never depends on a concrete service.
//! Two implementations ship: a streaming OpenRouter-compatible client and a
//! deterministic mock used when no API key is configured (and in tests).
//!
//! Whatever the implementation, returned text is already cleaned: stripping
//! code-fence markers from model output is the generator's responsibility,
//! not the scanner's or the planner's.

use anyhow::{Result, bail};
use async_trait::async_trait;
use futures::StreamExt;
use openrouter_api::{OpenRouterClient, Ready, types::chat::{ChatCompletionRequest, Message}};

use crate::element::ElementKind;
use crate::language::LanguageProfile;
use crate::prompt_builder::build_prompt;

#[async_trait]
pub trait DocGenerator: Send + Sync {
    /// Produces a documentation comment for one element. Errors surface
    /// per element; the batch workflow decides whether to continue.
    async fn generate(
        &self,
        profile: &LanguageProfile,
        kind: ElementKind,
        snippet: &str,
    ) -> Result<String>;
}

/// Chat-completion generator. The response is streamed and collected into
/// one string; nothing is printed while streaming since generation runs
/// inside progress reporting.
pub struct OpenRouterGenerator {
    client: OpenRouterClient<Ready>,
    model: String,
    system_prompt: String,
}

impl OpenRouterGenerator {
    pub fn new(client: OpenRouterClient<Ready>, model: String, system_prompt: String) -> Self {
        Self {
            client,
            model,
            system_prompt,
        }
    }
}

#[async_trait]
impl DocGenerator for OpenRouterGenerator {
    async fn generate(
        &self,
        profile: &LanguageProfile,
        kind: ElementKind,
        snippet: &str,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                    name: None,
                    tool_calls: None,
                },
                Message {
                    role: "user".to_string(),
                    content: build_prompt(profile, kind, snippet),
                    name: None,
                    tool_calls: None,
                },
            ],
            stream: Some(true),
            response_format: None,
            tools: None,
            provider: None,
            models: None,
            transforms: None,
        };

        let mut stream = self.client.chat()?.chat_completion_stream(request);
        let mut content = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if let Some(delta) = chunk.choices.first().and_then(|c| c.delta.content.as_deref()) {
                content.push_str(delta);
            }
        }

        let cleaned = strip_code_fences(&content);
        if cleaned.is_empty() {
            bail!("model returned an empty response for {kind} documentation");
        }
        Ok(cleaned)
    }
}

/// Deterministic generator for keyless runs and tests. Mirrors what a good
/// response looks like per kind so the insertion pipeline behaves exactly as
/// it would with a live model.
pub struct MockGenerator;

#[async_trait]
impl DocGenerator for MockGenerator {
    async fn generate(
        &self,
        profile: &LanguageProfile,
        kind: ElementKind,
        _snippet: &str,
    ) -> Result<String> {
        Ok(mock_docstring(profile, kind).to_string())
    }
}

fn mock_docstring(profile: &LanguageProfile, kind: ElementKind) -> &'static str {
    if profile.id != "csharp" {
        return "// TODO: Add documentation";
    }
    match kind {
        ElementKind::Method => {
            r#"/// <summary>
/// Processes the specified data and returns the result.
/// </summary>
/// <param name="input">The input data to process.</param>
/// <returns>The processed result.</returns>
/// <exception cref="ArgumentNullException">Thrown when input is null.</exception>"#
        }
        ElementKind::Class => {
            r#"/// <summary>
/// Represents a service for handling core business logic.
/// </summary>"#
        }
        ElementKind::Interface => {
            r#"/// <summary>
/// Defines the contract for a core application service.
/// </summary>"#
        }
        ElementKind::Enum => {
            r#"/// <summary>
/// Enumerates the values supported by this type.
/// </summary>"#
        }
        ElementKind::Property => {
            r#"/// <summary>
/// Gets or sets the value of this member.
/// </summary>"#
        }
    }
}

/// Removes a leading ```lang fence line and a trailing ``` fence, leaving
/// inner content (including inline backticks) untouched.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.trim();
    if cleaned.starts_with("```") {
        let after_fence = &cleaned[3..];
        cleaned = match after_fence.find('\n') {
            Some(offset) => &after_fence[offset + 1..],
            None => "",
        };
    }
    if let Some(stripped) = cleaned.strip_suffix("```") {
        cleaned = stripped.trim_end_matches('\n');
    }
    cleaned.trim().to_string()
}
