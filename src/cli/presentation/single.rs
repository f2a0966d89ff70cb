//! Single draft presentation.

use crate::types::GeneratedEmail;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_email_text(email: &GeneratedEmail, mail_uri: &str) -> String {
    format!(
        "{} {}\n\n{}\n\n{} {}",
        "Subject:".bold(),
        email.subject,
        email.body,
        "Open in mail client:".dimmed(),
        mail_uri
    )
}

pub fn format_email_json(email: &GeneratedEmail, mail_uri: &str) -> String {
    let out = json!({
        "subject": email.subject,
        "body": email.body,
        "mailto": mail_uri,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
