//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name used in log fields (e.g. "generate", "bulk").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Bulk { .. } => "bulk",
        Commands::Leads { .. } => "leads",
        Commands::Template { .. } => "template",
    }
}

/// Whether the command calls the generation provider.
pub fn uses_provider(command: &Commands) -> bool {
    matches!(command, Commands::Generate { .. } | Commands::Bulk { .. })
}
