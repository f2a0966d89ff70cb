//! Lead preview presentation.

use crate::types::Lead;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub fn format_leads_text(leads: &[Lead]) -> String {
    if leads.is_empty() {
        return "No valid leads found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Email", "Company", "Website"]);
    for (index, lead) in leads.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            lead.recipient_name.clone(),
            lead.recipient_email.clone().unwrap_or_else(|| "-".to_string()),
            lead.recipient_company.clone(),
            lead.recipient_website.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!("{}\n\nTotal: {} lead(s)", table, leads.len())
}

pub fn format_leads_json(leads: &[Lead]) -> String {
    let out = serde_json::json!({ "leads": leads, "total": leads.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
