//! ConfigLoader: composes config sources and deserializes to TermiConfig.

use super::{xdg, TermiConfig};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Environment prefix: `TERMIWEB__STORAGE__QUOTA_BYTES=...`
pub const ENV_PREFIX: &str = "TERMIWEB";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<TermiConfig, ConfigError> {
        Self::load_layers(xdg::global_config_path().as_deref(), explicit)
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<TermiConfig, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = Config::builder();
        if let Some(global) = global {
            builder = builder.add_source(File::from(global).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }
}
