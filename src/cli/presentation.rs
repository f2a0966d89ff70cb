//! CLI presentation: text and json formatters per command family.

mod bulk;
mod leads;
mod single;

pub use bulk::{format_batch_event_line, format_bulk_report_json, format_bulk_report_text};
pub use leads::{format_leads_json, format_leads_text};
pub use single::{format_email_json, format_email_text};
