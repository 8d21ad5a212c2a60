//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::FibConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Collector endpoint; its presence selects the remote exporter profile.
pub const ENV_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
/// Service name attached to traces.
pub const ENV_SERVICE_NAME: &str = "OTEL_SERVICE_NAME";
/// Prometheus listener address for the remote profile.
pub const ENV_METRICS_ADDRESS: &str = "FIB_METRICS_ADDRESS";
/// Log level.
pub const ENV_LOG_LEVEL: &str = "FIB_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FibConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: FibConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment settings on top of `config`.
///
/// Empty values are treated as unset.
pub fn apply_env<F>(config: &mut FibConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(endpoint) = var(ENV_ENDPOINT) {
        config.telemetry.endpoint = Some(endpoint);
    }
    if let Some(name) = var(ENV_SERVICE_NAME) {
        config.service_name = name;
    }
    if let Some(address) = var(ENV_METRICS_ADDRESS) {
        config.telemetry.metrics_address = address;
    }
    if let Some(level) = var(ENV_LOG_LEVEL) {
        config.telemetry.log_level = level;
    }
}

/// Build the configuration from an optional file plus the process environment.
///
/// The result is not validated yet; callers apply their own overrides first.
pub fn discover(path: Option<&Path>) -> Result<FibConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml::from_str::<FibConfig>(&fs::read_to_string(path)?)?,
        None => FibConfig::default(),
    };
    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = FibConfig::default();
        apply_env(
            &mut config,
            lookup(&[
                (ENV_ENDPOINT, "http://collector:4318"),
                (ENV_SERVICE_NAME, "fib-prod"),
                (ENV_LOG_LEVEL, "debug"),
            ]),
        );

        assert_eq!(config.telemetry.endpoint.as_deref(), Some("http://collector:4318"));
        assert_eq!(config.service_name, "fib-prod");
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.telemetry.metrics_address, "0.0.0.0:9464");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = FibConfig::default();
        apply_env(&mut config, lookup(&[(ENV_ENDPOINT, ""), (ENV_SERVICE_NAME, "  ")]));

        assert!(config.telemetry.endpoint.is_none());
        assert_eq!(config.service_name, "fib-observer");
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("fib-observer-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "service_name = \"from-file\"\n[runner]\nwork_delay_us = 500\n").unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.service_name, "from-file");
        assert_eq!(config.runner.work_delay_us, 500);
    }

    #[test]
    fn test_load_config_reports_validation() {
        let path = std::env::temp_dir().join(format!("fib-observer-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[telemetry]\nlog_level = \"loud\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/fib-observer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
