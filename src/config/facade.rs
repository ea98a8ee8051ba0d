//! Config loading facade: the one place that assembles sources and deserializes.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file};
use super::ExchangeConfig;
use crate::error::ExchangeError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global config file (if present) and the environment.
    pub fn load() -> Result<ExchangeConfig, ExchangeError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder);
        Self::finish(builder.build()?.try_deserialize()?)
    }

    /// Load from defaults, the given file (which must exist) and the environment.
    pub fn load_from_file(path: &Path) -> Result<ExchangeConfig, ExchangeError> {
        debug!(config_path = %path.display(), "Loading configuration file");
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        Self::finish(builder.build()?.try_deserialize()?)
    }

    /// Explicit file when given, default sources otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<ExchangeConfig, ExchangeError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    fn finish(config: ExchangeConfig) -> Result<ExchangeConfig, ExchangeError> {
        config.validate().map_err(|errors| {
            ExchangeError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
