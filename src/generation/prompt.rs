//! Prompt rendering for pitch drafts.

use crate::types::PitchRequest;
use serde_json::{json, Value};

const NOT_SPECIFIED: &str = "Not specified";

pub const SYSTEM_PROMPT: &str = "You are a senior sales copywriter and technical consultant. \
You write cold outreach emails for freelancers and agencies who build websites and \
integrate AI features such as chatbots, workflow automation, and personalization.";

/// Render the user instruction for one pitch. Identical requests render identically.
pub fn render_pitch_prompt(request: &PitchRequest) -> String {
    let website = optional(request.recipient_website.as_deref());
    let portfolio = optional(request.sender_portfolio.as_deref());

    format!(
        "Write a cold outreach email proposing a website build or redesign with custom AI integration.\n\
         \n\
         Details:\n\
         - Recipient name: {recipient_name}\n\
         - Recipient company: {recipient_company}\n\
         - Recipient website: {website}\n\
         - Sender name: {sender_name}\n\
         - Sender portfolio or agency: {portfolio}\n\
         - Value proposition to emphasise: {focus}\n\
         - Tone: {tone}\n\
         \n\
         Requirements:\n\
         - Keep it short, specific, and about the recipient's revenue or time saved.\n\
         - Write a subject line that makes the recipient want to open the email.\n\
         - Separate body paragraphs with one blank line (\\n\\n).\n\
         \n\
         Respond with a JSON object holding exactly two string fields: \"subject\" and \"body\".",
        recipient_name = request.recipient_name.trim(),
        recipient_company = request.recipient_company.trim(),
        website = website,
        sender_name = request.sender_name.trim(),
        portfolio = portfolio,
        focus = optional(Some(request.specific_focus.as_str())),
        tone = request.tone,
    )
}

/// Structured-output schema sent with every request.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "subject": { "type": "STRING" },
            "body": { "type": "STRING" }
        },
        "required": ["subject", "body"]
    })
}

fn optional(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}
