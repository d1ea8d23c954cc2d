use crate::sanitize::MissingPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_EVENT_BUFFER: usize = 64;
const CONFIG_DIR: &str = "config";

/// Core configuration for embedding applications.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Policy applied to missing-value sentinels on sanitized writes.
    #[serde(default)]
    pub missing_value_policy: MissingPolicy,

    /// Buffer size of the domain event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Log level filter used when the embedder initializes tracing.
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1))]
    pub log_level: String,
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            missing_value_policy: MissingPolicy::default(),
            event_buffer: default_event_buffer(),
            log_level: default_log_level(),
        }
    }
}

/// Loads configuration from layered sources: `config/default`, then
/// `config/{RUN_ENV}`, then `CAFESTOCK_`-prefixed environment variables.
/// Every layer is optional; absent sources fall back to defaults.
pub fn load_config() -> Result<CoreConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    Config::builder()
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("CAFESTOCK").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.missing_value_policy, MissingPolicy::Null);
        assert_eq!(cfg.event_buffer, 64);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        let cfg: CoreConfig =
            serde_json::from_str(r#"{"missing_value_policy": "drop"}"#).unwrap();
        assert_eq!(cfg.missing_value_policy, MissingPolicy::Drop);
    }
}
