//! Model Provider Abstraction
//!
//! Unified interface for the LLM services that write the drafts (Google Gemini,
//! OpenAI, local models via Ollama). The generation client talks to this trait
//! only, so providers can be swapped by configuration or replaced in tests.

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub mod profile;

pub use profile::{ProviderConfig, ProviderType};

/// Model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelProvider {
    Gemini {
        model: String,
        api_key: Option<String>,
        base_url: Option<String>, // Default: https://generativelanguage.googleapis.com
    },
    OpenAI {
        model: String,
        api_key: Option<String>,
        base_url: Option<String>, // For custom endpoints (e.g., Azure OpenAI)
    },
    Ollama {
        model: String,
        base_url: Option<String>, // Default: http://localhost:11434
    },
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Completion options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,  // 0.0-2.0, default: 1.0
    pub max_tokens: Option<u32>,   // Maximum tokens to generate
    pub top_p: Option<f32>,        // Nucleus sampling
    pub stop: Option<Vec<String>>, // Stop sequences
    /// JSON schema the output must follow; also switches the provider to JSON output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: Some(1.0),
            max_tokens: None,
            top_p: None,
            stop: None,
            response_schema: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Generate a completion from a list of messages
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Connect and overall request timeouts for provider HTTP calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(120),
        }
    }
}

// OpenAI-compatible API request/response structures
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// Helper function to convert MessageRole to string
fn role_to_string(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

// Helper function to map transport errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        map_status_error(status, &error.to_string())
    } else if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn map_status_error(status: StatusCode, error_text: &str) -> ApiError {
    match status.as_u16() {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", error_text)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", error_text)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", error_text)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, error_text
        )),
    }
}

async fn error_for_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    map_status_error(status, &error_text)
}

fn require_api_key<'a>(api_key: &'a Option<String>, provider: &str) -> Result<&'a str, ApiError> {
    api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            ApiError::ProviderAuthFailed(format!("No API key configured for {}", provider))
        })
}

fn build_provider_http_client(timeouts: &HttpTimeouts) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request)
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// Shared request path for OpenAI and OpenAI-compatible endpoints.
async fn complete_openai_compatible(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
    model: &str,
    messages: Vec<ChatMessage>,
    options: CompletionOptions,
) -> Result<CompletionResponse, ApiError> {
    let openai_messages: Vec<OpenAIMessage> = messages
        .into_iter()
        .map(|msg| OpenAIMessage {
            role: role_to_string(msg.role).to_string(),
            content: msg.content,
        })
        .collect();

    let request = ChatCompletionRequest {
        model: model.to_string(),
        messages: openai_messages,
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        top_p: options.top_p,
        stop: options.stop,
        response_format: options
            .response_schema
            .as_ref()
            .map(|_| json!({ "type": "json_object" })),
        stream: false,
    };

    let mut request_builder = client.post(url).header("Content-Type", "application/json");
    if let Some(api_key) = api_key {
        request_builder = request_builder.header("Authorization", format!("Bearer {}", api_key));
    }

    let response = request_builder
        .json(&request)
        .send()
        .await
        .map_err(map_http_error)?;

    if !response.status().is_success() {
        return Err(error_for_response(response).await);
    }

    let completion: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::ProviderError("No choices in response".to_string()))?;

    let usage = completion.usage.unwrap_or(Usage {
        prompt_tokens: 0,
        completion_tokens: 0,
        total_tokens: 0,
    });

    Ok(CompletionResponse {
        content: choice.message.content,
        model: completion.model,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
        finish_reason: choice.finish_reason,
    })
}

/// Google Gemini provider client (`generateContent` REST API)
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        timeouts: &HttpTimeouts,
    ) -> Result<Self, ApiError> {
        let client = build_provider_http_client(timeouts)?;
        let base_url = base_url.unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }
}

/// Build the `generateContent` request body. System messages become the
/// system instruction; assistant turns use Gemini's `model` role.
pub fn gemini_request_body(messages: &[ChatMessage], options: &CompletionOptions) -> Value {
    let system_text: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str())
        .collect();

    let contents: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .map(|m| {
            let role = match m.role {
                MessageRole::Assistant => "model",
                _ => "user",
            };
            json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect();

    let mut generation_config = json!({});
    if let Some(temp) = options.temperature {
        generation_config["temperature"] = json!(temp);
    }
    if let Some(max_tokens) = options.max_tokens {
        generation_config["maxOutputTokens"] = json!(max_tokens);
    }
    if let Some(top_p) = options.top_p {
        generation_config["topP"] = json!(top_p);
    }
    if let Some(ref stop) = options.stop {
        generation_config["stopSequences"] = json!(stop);
    }
    if let Some(ref schema) = options.response_schema {
        generation_config["responseMimeType"] = json!("application/json");
        generation_config["responseSchema"] = schema.clone();
    }

    let mut body = json!({
        "contents": contents,
        "generationConfig": generation_config,
    });
    if !system_text.is_empty() {
        body["systemInstruction"] = json!({ "parts": [{ "text": system_text.join("\n\n") }] });
    }
    body
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[async_trait]
impl ModelProviderClient for GeminiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let api_key = require_api_key(&self.api_key, "gemini")?;
        let body = gemini_request_body(&messages, &options);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        debug!(provider = "gemini", model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let completion: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let candidate = completion
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ProviderError("No candidates in response".to_string()))?;

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let usage = completion
            .usage_metadata
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: completion.model_version.unwrap_or_else(|| self.model.clone()),
            usage,
            finish_reason: candidate.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// OpenAI provider client
pub struct OpenAIClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        timeouts: &HttpTimeouts,
    ) -> Result<Self, ApiError> {
        let client = build_provider_http_client(timeouts)?;
        let base_url = base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl ModelProviderClient for OpenAIClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let api_key = require_api_key(&self.api_key, "openai")?;
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        complete_openai_compatible(
            &self.client,
            &url,
            Some(api_key),
            &self.model,
            messages,
            options,
        )
        .await
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Ollama provider client (local models)
pub struct OllamaClient {
    client: Client,
    model: String,
    base_url: String,
}

impl OllamaClient {
    pub fn new(
        model: String,
        base_url: Option<String>,
        timeouts: &HttpTimeouts,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.unwrap_or_else(|| "http://localhost:11434".to_string());
        let client = build_provider_http_client(timeouts)?;

        Ok(Self {
            client,
            model,
            base_url,
        })
    }
}

#[async_trait]
impl ModelProviderClient for OllamaClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        // Ollama uses OpenAI-compatible API format
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        complete_openai_compatible(&self.client, &url, None, &self.model, messages, options).await
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider factory for creating provider clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(
        provider: &ModelProvider,
        timeouts: &HttpTimeouts,
    ) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        match provider {
            ModelProvider::Gemini {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(GeminiClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                timeouts,
            )?)),
            ModelProvider::OpenAI {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(OpenAIClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                timeouts,
            )?)),
            ModelProvider::Ollama { model, base_url } => Ok(Box::new(OllamaClient::new(
                model.clone(),
                base_url.clone(),
                timeouts,
            )?)),
        }
    }
}

// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    responses: Vec<Result<String, String>>,
    current: std::sync::Mutex<usize>,
    received: std::sync::Mutex<Vec<(Vec<ChatMessage>, CompletionOptions)>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses,
            current: std::sync::Mutex::new(0),
            received: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<(Vec<ChatMessage>, CompletionOptions)> {
        self.received.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ModelProviderClient for MockProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        self.received.lock().unwrap().push((messages, options));
        let mut idx = self.current.lock().unwrap();
        let response = self
            .responses
            .get(*idx)
            .cloned()
            .unwrap_or_else(|| Ok("Mock response".to_string()));
        *idx += 1;

        let content = response.map_err(ApiError::ProviderRequestFailed)?;
        Ok(CompletionResponse {
            content,
            model: "mock-model".to_string(),
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            },
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
