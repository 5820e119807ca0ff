//! Application configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `WEATHERDESK_`-prefixed environment variables (nested keys joined with
//! `__`, e.g. `WEATHERDESK_WEATHER__TIMEOUT_SECS=10`).

mod logging;

use std::path::Path;

use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use logging::LoggingConfig;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "WEATHERDESK";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` in the working directory (if
    /// present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, or from the default
    /// `config.toml` when `path` is `None`
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = path.map_or_else(
            || config::File::with_name("config").required(false),
            |path| config::File::from(path).required(true),
        );

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., WEATHERDESK_LOGGING__JSON=true)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config
            .weather
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        debug!(
            base_url = %config.weather.base_url,
            timeout_secs = config.weather.timeout_secs,
            timezone = %config.weather.timezone,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
