//! Configuration System
//!
//! Layered configuration for the provider, sender defaults, bulk pacing, and
//! logging. Sources merge in order: built-in defaults, the global config file,
//! workspace files, then `OUTREACH__*` environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::{SenderStrategy, Tone};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutreachConfig {
    /// Generation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Sender defaults for the single and bulk flows
    #[serde(default)]
    pub sender: SenderDefaults,

    /// Bulk runner settings
    #[serde(default)]
    pub bulk: BulkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults used when the sender fields are not given on the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderDefaults {
    #[serde(default)]
    pub sender_name: Option<String>,

    #[serde(default)]
    pub sender_portfolio: Option<String>,

    #[serde(default)]
    pub tone: Tone,

    #[serde(default = "default_specific_focus")]
    pub specific_focus: String,
}

fn default_specific_focus() -> String {
    "Customer support automation".to_string()
}

impl Default for SenderDefaults {
    fn default() -> Self {
        Self {
            sender_name: None,
            sender_portfolio: None,
            tone: Tone::default(),
            specific_focus: default_specific_focus(),
        }
    }
}

impl SenderDefaults {
    /// Build a strategy, letting explicit values win over configured defaults.
    pub fn strategy_with(
        &self,
        sender_name: Option<String>,
        sender_portfolio: Option<String>,
        tone: Option<Tone>,
        specific_focus: Option<String>,
    ) -> SenderStrategy {
        SenderStrategy {
            sender_name: sender_name
                .or_else(|| self.sender_name.clone())
                .unwrap_or_default(),
            sender_portfolio: crate::types::non_blank(
                sender_portfolio
                    .as_deref()
                    .or(self.sender_portfolio.as_deref()),
            ),
            tone: tone.unwrap_or(self.tone),
            specific_focus: specific_focus.unwrap_or_else(|| self.specific_focus.clone()),
        }
    }
}

/// Bulk runner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Pause between consecutive generation calls
    #[serde(default)]
    pub delay_ms: u64,
}

impl BulkConfig {
    pub fn delay(&self) -> Option<Duration> {
        (self.delay_ms > 0).then(|| Duration::from_millis(self.delay_ms))
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl OutreachConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every problem into one ConfigError.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
