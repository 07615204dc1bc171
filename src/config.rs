use crate::client::Backend;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a documentation expert. Generate clear, concise docstrings following Microsoft's style guidelines.";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    pub model: String,
    pub system_prompt: String,
    pub timeout_seconds: u64,
    /// Profile used when a file's extension is not recognized.
    pub language: String,
    /// Pause between sequential generation requests in batch mode.
    pub request_delay_ms: u64,
    /// Retries per element after a failed generation request.
    pub max_retries: u32,
    /// Base backoff before a retry; doubles per attempt, plus jitter.
    pub retry_backoff_ms: u64,
    /// Regenerate documentation for elements that already have it.
    pub replace_existing: bool,
    /// Skip braces inside string literals and comments during span scans.
    pub delimiter_context: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model: "openai/gpt-4o-mini".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_seconds: 120,
            language: "csharp".to_string(),
            request_delay_ms: 500,
            max_retries: 2,
            retry_backoff_ms: 1000,
            replace_existing: false,
            delimiter_context: false,
        }
    }
}

pub fn load_or_create() -> Result<Config> {
    let xdg_dirs = xdg::BaseDirectories::new();
    let config_path = xdg_dirs.place_config_file("aidoc/config.toml")?;

    if !config_path.exists() {
        let default_config = Config::default();
        let toml_string = toml::to_string_pretty(&default_config)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml_string)?;

        println!("Created default config at: {}", config_path.display());
        return Ok(default_config);
    }

    let config_string = fs::read_to_string(&config_path)?;
    let config: Config = toml::from_str(&config_string)?;

    // Fill in missing fields with default values. Zero-valued delay and
    // retry counts are legitimate settings and stay as written.
    let default_config = Config::default();
    let final_config = Config {
        model: if config.model.is_empty() {
            default_config.model
        } else {
            config.model
        },
        system_prompt: if config.system_prompt.is_empty() {
            default_config.system_prompt
        } else {
            config.system_prompt
        },
        timeout_seconds: if config.timeout_seconds == 0 {
            default_config.timeout_seconds
        } else {
            config.timeout_seconds
        },
        language: if config.language.is_empty() {
            default_config.language
        } else {
            config.language
        },
        backend: config.backend,
        request_delay_ms: config.request_delay_ms,
        max_retries: config.max_retries,
        retry_backoff_ms: config.retry_backoff_ms,
        replace_existing: config.replace_existing,
        delimiter_context: config.delimiter_context,
    };

    // If any values were missing, write the complete config back to the file
    // so users can see all available options.
    let final_toml_string = toml::to_string_pretty(&final_config)?;
    if final_toml_string != config_string {
        fs::write(&config_path, final_toml_string)?;
    }

    Ok(final_config)
}
