//! Parsing and validation of the generation service's JSON reply.

use crate::types::GeneratedEmail;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEmail {
    subject: String,
    body: String,
}

/// Why a reply was rejected. Only logged; callers see a `GenerationError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseProblem {
    #[error("empty response")]
    Empty,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response field '{0}' is blank")]
    BlankField(&'static str),
}

/// Validate a reply against the `{subject, body}` schema.
pub fn parse_generated_email(raw: &str) -> Result<GeneratedEmail, ResponseProblem> {
    let text = strip_code_fence(raw.trim());
    if text.is_empty() {
        return Err(ResponseProblem::Empty);
    }

    let parsed: RawEmail =
        serde_json::from_str(text).map_err(|e| ResponseProblem::Malformed(e.to_string()))?;

    if parsed.subject.trim().is_empty() {
        return Err(ResponseProblem::BlankField("subject"));
    }
    if parsed.body.trim().is_empty() {
        return Err(ResponseProblem::BlankField("body"));
    }

    Ok(GeneratedEmail {
        subject: parsed.subject.trim().to_string(),
        body: parsed.body.trim().to_string(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, tail)| tail).unwrap_or("");
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}
