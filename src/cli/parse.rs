//! CLI parse: clap types for outreach. No behavior; definitions only.

use crate::types::Tone;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Outreach CLI - cold-outreach email drafting
#[derive(Parser)]
#[command(name = "outreach")]
#[command(about = "Draft cold-outreach emails with an LLM, one at a time or from a spreadsheet")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Sender-side fields shared by the single and bulk flows.
/// Anything left out falls back to the `[sender]` config table.
#[derive(Args, Debug, Clone, Default)]
pub struct SenderArgs {
    /// Your name, as it should appear in the signature
    #[arg(long)]
    pub sender_name: Option<String>,

    /// Portfolio URL or agency name
    #[arg(long)]
    pub portfolio: Option<String>,

    /// Tone: Professional, Casual, Persuasive, Direct
    #[arg(long, value_parser = parse_tone)]
    pub tone: Option<Tone>,

    /// Value proposition to emphasise
    #[arg(long)]
    pub focus: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draft one email for a single recipient
    Generate {
        /// Recipient name
        #[arg(long)]
        name: Option<String>,

        /// Recipient email (used for the mail link)
        #[arg(long)]
        email: Option<String>,

        /// Recipient company
        #[arg(long)]
        company: Option<String>,

        /// Recipient website
        #[arg(long)]
        website: Option<String>,

        #[command(flatten)]
        sender: SenderArgs,

        /// Prompt for any field not given as a flag
        #[arg(long, short = 'i')]
        interactive: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Draft one email per lead in a spreadsheet, sequentially
    Bulk {
        /// Lead file (.csv, .xlsx, .xlsm, .xls, .ods)
        file: PathBuf,

        #[command(flatten)]
        sender: SenderArgs,

        /// Write all results to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Pause between generation calls in milliseconds (overrides bulk.delay_ms)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Preview the leads a spreadsheet would produce
    Leads {
        /// Lead file (.csv, .xlsx, .xlsm, .xls, .ods)
        file: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write the lead template CSV
    Template {
        /// Target file or directory (default: ./leads_template.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_tone(value: &str) -> Result<Tone, String> {
    value.parse::<Tone>().map_err(|e| e.to_string())
}
