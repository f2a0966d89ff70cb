//! Core data model: pitch requests, leads, sender strategy, generated drafts.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Writing tone requested from the generation service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(alias = "professional")]
    Professional,
    #[serde(alias = "casual")]
    Casual,
    #[serde(alias = "persuasive")]
    Persuasive,
    #[serde(alias = "direct")]
    Direct,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Persuasive,
        Tone::Direct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Persuasive => "Persuasive",
            Tone::Direct => "Direct",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::InvalidTone(s.to_string()))
    }
}

/// Complete parameter set for one email draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRequest {
    pub recipient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    pub recipient_company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_website: Option<String>,
    pub sender_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_portfolio: Option<String>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub specific_focus: String,
}

impl PitchRequest {
    /// Check the required fields are present after trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Recipient name", &self.recipient_name)?;
        require("Recipient company", &self.recipient_company)?;
        require("Sender name", &self.sender_name)?;
        Ok(())
    }
}

/// Subject/body pair returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
}

/// One prospective recipient extracted from a bulk input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub recipient_name: String,
    pub recipient_company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_website: Option<String>,
}

/// Sender-side settings shared across a whole bulk batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderStrategy {
    pub sender_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_portfolio: Option<String>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub specific_focus: String,
}

impl SenderStrategy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Sender name", &self.sender_name)
    }

    /// Combine this strategy with one lead.
    pub fn pitch_for(&self, lead: &Lead) -> PitchRequest {
        PitchRequest {
            recipient_name: lead.recipient_name.clone(),
            recipient_email: lead.recipient_email.clone(),
            recipient_company: lead.recipient_company.clone(),
            recipient_website: lead.recipient_website.clone(),
            sender_name: self.sender_name.clone(),
            sender_portfolio: self.sender_portfolio.clone(),
            tone: self.tone,
            specific_focus: self.specific_focus.clone(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Treat blank optional text as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
