//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ProviderAuthFailed(_) => format!(
            "{}\nSet OUTREACH_API_KEY (or the provider's own key variable) and try again.",
            e
        ),
        _ => e.to_string(),
    }
}
