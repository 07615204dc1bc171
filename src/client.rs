use crate::config::Config;
use anyhow::{Result, bail};
use openrouter_api::{OpenRouterClient, Ready};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct BackendConfig {
    pub base_url: String,
    pub api_key_env_var: Option<&'static str>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Openrouter,
    Ollama,
    Openai,
}

impl Backend {
    pub fn config(&self) -> BackendConfig {
        match self {
            Backend::Openrouter => BackendConfig {
                base_url: "https://openrouter.ai/api/v1/".to_string(),
                api_key_env_var: Some("OPENROUTER_API_KEY"),
            },
            Backend::Ollama => BackendConfig {
                base_url: "http://localhost:11434/v1/".to_string(),
                api_key_env_var: None,
            },
            Backend::Openai => BackendConfig {
                base_url: "https://api.openai.com/v1/".to_string(),
                api_key_env_var: Some("OPENAI_API_KEY"),
            },
        }
    }

    /// True when the backend either needs no key or its key is present in
    /// the environment. A missing key is not an error at this level; the
    /// caller falls back to the mock generator.
    pub fn has_api_key(&self) -> bool {
        match self.config().api_key_env_var {
            Some(env_var) => std::env::var(env_var).is_ok(),
            None => true,
        }
    }
}

pub fn initialize_client(config: &Config) -> Result<OpenRouterClient<Ready>> {
    let backend = config.backend.config();
    let api_key = if let Some(env_var) = backend.api_key_env_var {
        match std::env::var(env_var) {
            Ok(val) => val,
            Err(_) => bail!("environment variable {} not set", env_var),
        }
    } else {
        // Keyless backends still need a syntactically valid key.
        "sk-or-v1-0000000000000000000000000000000000000000000000000000000000000000".to_string()
    };
    let client = OpenRouterClient::new()
        .with_base_url(&backend.base_url)?
        .with_timeout(Duration::from_secs(config.timeout_seconds))
        .with_api_key(api_key)?;
    Ok(client)
}
