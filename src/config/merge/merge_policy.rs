//! Merge rules: defaults, override order, conflict handling.

use crate::config::DEFAULT_PORT;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied. Sources added afterwards
/// override these values in the order they are added.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("connection.host", "localhost")?
        .set_default("connection.port", i64::from(DEFAULT_PORT))?
        .set_default("connection.timeout_secs", 30_i64)
}
