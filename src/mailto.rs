//! Mail client handoff links.
//!
//! Builds `mailto:` URIs with the same escaping as JavaScript's
//! `encodeURIComponent`, so any desktop mail client opens a pre-filled draft.

use crate::error::MailtoError;
use crate::types::GeneratedEmail;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` escapes: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const RECIPIENT: &AsciiSet = &URI_COMPONENT.remove(b'@');

const SCHEME: &str = "mailto:";

/// Decoded contents of a mail URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Normalise line endings to CRLF, as mail clients expect in `body`.
pub fn crlf(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// `mailto:<to>?subject=<enc>&body=<enc>`; the address part is blank when unknown.
pub fn mailto_uri(recipient: Option<&str>, email: &GeneratedEmail) -> String {
    let to = recipient
        .map(str::trim)
        .map(|r| utf8_percent_encode(r, RECIPIENT).to_string())
        .unwrap_or_default();
    format!(
        "{}{}?subject={}&body={}",
        SCHEME,
        to,
        encode_component(&email.subject),
        encode_component(&crlf(&email.body))
    )
}

/// Decode a mail URI. The body keeps its CRLF line endings.
pub fn parse_mailto(uri: &str) -> Result<MailDraft, MailtoError> {
    let rest = uri
        .strip_prefix(SCHEME)
        .ok_or_else(|| MailtoError::MissingScheme(uri.to_string()))?;
    let (to, query) = rest.split_once('?').unwrap_or((rest, ""));

    let mut draft = MailDraft {
        to: decode("to", to)?,
        subject: String::new(),
        body: String::new(),
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key.to_ascii_lowercase().as_str() {
            "subject" => draft.subject = decode("subject", value)?,
            "body" => draft.body = decode("body", value)?,
            _ => {}
        }
    }

    Ok(draft)
}

fn decode(field: &str, value: &str) -> Result<String, MailtoError> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|_| MailtoError::InvalidEncoding {
            field: field.to_string(),
        })
}
