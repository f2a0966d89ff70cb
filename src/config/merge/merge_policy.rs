//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// `provider.model` has no default here; it depends on the provider type and is
/// filled in after deserialization.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.provider_type", "gemini")?
        .set_default("provider.connect_timeout_secs", 10)?
        .set_default("provider.timeout_secs", 120)?
        .set_default("sender.tone", "Professional")?
        .set_default("sender.specific_focus", "Customer support automation")?
        .set_default("bulk.delay_ms", 0)
}
