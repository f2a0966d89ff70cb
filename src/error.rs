//! Error types for the outreach drafting system.

use crate::bulk::JobStatus;
use thiserror::Error;

/// Message surfaced to users for every failed generation attempt.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate email. Please check your API key and try again.";

/// Spreadsheet ingestion errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Please upload a valid spreadsheet (.xlsx, .xls, .ods, .csv); got {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse spreadsheet file. Please ensure it is a valid Excel or CSV file. ({0})")]
    Decode(String),

    #[error("Spreadsheet does not contain any worksheet")]
    NoWorksheet,

    #[error("No valid leads found in file. Please ensure columns match the template: Name, Email, Company, Website.")]
    NoValidLeads,

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Input boundary errors for pitch and sender fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Invalid tone: {0} (must be Professional, Casual, Persuasive, or Direct)")]
    InvalidTone(String),
}

/// A failed generation call. Always carries a user-facing message, never
/// provider internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
    message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The standard failure surfaced for provider, timeout, auth, and schema problems.
    pub fn failed() -> Self {
        Self::new(GENERATION_FAILED_MESSAGE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Illegal job status change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid job transition for {lead_id}: {from:?} -> {to:?}")]
pub struct TransitionError {
    pub lead_id: String,
    pub from: JobStatus,
    pub to: JobStatus,
}

/// Mail URI decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailtoError {
    #[error("Not a mailto URI: {0}")]
    MissingScheme(String),

    #[error("Invalid percent-encoding in {field}")]
    InvalidEncoding { field: String },
}

/// Crate-level errors returned by configuration, providers, and CLI routes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Mailto(#[from] MailtoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ApiError {
    fn from(err: dialoguer::Error) -> Self {
        ApiError::InputError(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
    }
}
