//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, uses_provider};
pub use output::map_error;
pub use parse::{Cli, Commands, SenderArgs};
pub use presentation::{
    format_batch_event_line, format_bulk_report_json, format_bulk_report_text, format_email_json,
    format_email_text, format_leads_json, format_leads_text,
};
pub use route::RunContext;
