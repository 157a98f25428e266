//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `SURVEY_INSIGHTS` prefix and nested fields use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use survey_insights::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod aggregation;
mod error;

pub use aggregation::AggregationConfig;
pub use error::ConfigError;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Aggregation engine tunables.
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Rust log filter directive for the demo binary.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file when present (development), then environment
    /// variables such as
    /// `SURVEY_INSIGHTS__AGGREGATION__OPEN_TEXT_SAMPLE_LIMIT=50`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SURVEY_INSIGHTS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aggregation.validate()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }
}
