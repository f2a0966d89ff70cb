//! ConfigLoader: the only entry point that turns sources into an OutreachConfig.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::OutreachConfig;
use config::{Config, ConfigError, File};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{OUTREACH_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<OutreachConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Load configuration from one explicit file; the environment still overrides it.
    pub fn load_from_file(path: &Path) -> Result<OutreachConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Built-in defaults only, with credentials still taken from the environment.
    pub fn default() -> OutreachConfig {
        let mut config = OutreachConfig::default();
        config.provider.resolve_api_key_from_env();
        config
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(raw: Config) -> Result<OutreachConfig, ConfigError> {
        let mut config: OutreachConfig = raw.try_deserialize()?;
        if config.provider.model.trim().is_empty() {
            config.provider.model = config.provider.provider_type.default_model().to_string();
        }
        config.provider.resolve_api_key_from_env();
        Ok(config)
    }
}
