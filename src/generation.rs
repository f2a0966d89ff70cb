//! Generation client: one provider call per pitch request.
//!
//! Builds the instruction, asks the provider for structured JSON, and validates
//! the reply. Every failure collapses into the same user-facing
//! [`GenerationError`]; the underlying cause only goes to the log.

pub mod prompt;
pub mod response;

use crate::error::{ApiError, GenerationError};
use crate::provider::{
    ChatMessage, CompletionOptions, ModelProviderClient, ProviderConfig, ProviderFactory,
};
use crate::types::{GeneratedEmail, PitchRequest};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, error, info};

/// Anything that can turn a pitch request into a draft.
#[async_trait]
pub trait EmailGenerator: Send + Sync {
    async fn generate(&self, request: &PitchRequest) -> Result<GeneratedEmail, GenerationError>;
}

pub struct GenerationClient {
    provider: Box<dyn ModelProviderClient>,
    options: CompletionOptions,
}

impl GenerationClient {
    pub fn new(provider: Box<dyn ModelProviderClient>, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    /// Build the provider client described by the configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        let model_provider = config.to_model_provider()?;
        let provider = ProviderFactory::create_client(&model_provider, &config.timeouts())?;
        Ok(Self::new(provider, config.default_options.clone()))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    fn request_options(&self) -> CompletionOptions {
        let mut options = self.options.clone();
        options.response_schema = Some(prompt::response_schema());
        options
    }
}

#[async_trait]
impl EmailGenerator for GenerationClient {
    async fn generate(&self, request: &PitchRequest) -> Result<GeneratedEmail, GenerationError> {
        let messages = vec![
            ChatMessage::system(prompt::SYSTEM_PROMPT),
            ChatMessage::user(prompt::render_pitch_prompt(request)),
        ];
        let started = Instant::now();
        debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            company = %request.recipient_company,
            "Requesting email draft"
        );

        let response = match self.provider.complete(messages, self.request_options()).await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    provider = self.provider.provider_name(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "Error generating email"
                );
                return Err(GenerationError::failed());
            }
        };

        match response::parse_generated_email(&response.content) {
            Ok(email) => {
                info!(
                    provider = self.provider.provider_name(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    total_tokens = response.usage.total_tokens,
                    "Email draft generated"
                );
                Ok(email)
            }
            Err(problem) => {
                error!(
                    provider = self.provider.provider_name(),
                    problem = %problem,
                    "Generation reply failed validation"
                );
                Err(GenerationError::failed())
            }
        }
    }
}
