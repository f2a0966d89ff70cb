//! Provider profile: the configured provider, model, credentials, and timeouts.

use crate::error::ApiError;
use crate::provider::{CompletionOptions, HttpTimeouts, ModelProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider type identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
    OpenAI,
    Ollama,
}

impl ProviderType {
    pub fn slug(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenAI => "openai",
            ProviderType::Ollama => "ollama",
        }
    }

    /// Environment variable holding this provider's API key, if it uses one.
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            ProviderType::Gemini => Some("GEMINI_API_KEY"),
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Ollama => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini-2.5-flash",
            ProviderType::OpenAI => "gpt-4o-mini",
            ProviderType::Ollama => "llama3",
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    120
}

/// Provider configuration as loaded from config files and the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider_type: ProviderType,

    #[serde(default)]
    pub model: String,

    /// Falls back to OUTREACH_API_KEY, the provider's own variable, then API_KEY
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Custom base URL
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub default_options: CompletionOptions,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            model: ProviderType::default().default_model().to_string(),
            api_key: None,
            endpoint: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            default_options: CompletionOptions::default(),
        }
    }
}

impl ProviderConfig {
    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }

        if let Some(temp) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(format!("Temperature must be between 0.0 and 2.0, got {}", temp));
            }
        }

        Ok(())
    }

    /// Fill a missing API key from the environment.
    pub fn resolve_api_key_from_env(&mut self) {
        if self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
            return;
        }
        let candidates = ["OUTREACH_API_KEY"]
            .into_iter()
            .chain(self.provider_type.api_key_env_var())
            .chain(["API_KEY"]);
        self.api_key = candidates
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty());
    }

    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            request: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Convert to ModelProvider enum
    pub fn to_model_provider(&self) -> Result<ModelProvider, ApiError> {
        self.validate().map_err(ApiError::ConfigError)?;
        let model = self.model.clone();
        Ok(match self.provider_type {
            ProviderType::Gemini => ModelProvider::Gemini {
                model,
                api_key: self.api_key.clone(),
                base_url: self.endpoint.clone(),
            },
            ProviderType::OpenAI => ModelProvider::OpenAI {
                model,
                api_key: self.api_key.clone(),
                base_url: self.endpoint.clone(),
            },
            ProviderType::Ollama => ModelProvider::Ollama {
                model,
                base_url: self.endpoint.clone(),
            },
        })
    }

    /// Short description of the key state, never the key itself
    pub fn api_key_status(&self) -> &'static str {
        match (self.provider_type.api_key_env_var(), self.api_key.as_deref()) {
            (None, _) => "not required",
            (Some(_), Some(key)) if !key.trim().is_empty() => "configured",
            (Some(_), _) => "missing",
        }
    }
}
