//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! field has a default so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

use crate::compute::OverflowPolicy;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FibConfig {
    /// Service name attached to exported traces.
    pub service_name: String,

    /// Telemetry settings.
    pub telemetry: TelemetryConfig,

    /// Run loop settings.
    pub runner: RunnerConfig,
}

impl Default for FibConfig {
    fn default() -> Self {
        Self {
            service_name: "fib-observer".to_string(),
            telemetry: TelemetryConfig::default(),
            runner: RunnerConfig::default(),
        }
    }
}

/// Telemetry settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Collector endpoint. Presence selects the remote exporter profile.
    pub endpoint: Option<String>,

    /// Prometheus scrape listener used by the remote profile.
    pub metrics_address: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of text.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            metrics_address: "0.0.0.0:9464".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Run loop settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Overflow behavior of the computation.
    pub overflow: OverflowPolicy,

    /// Simulated work added to every computation, in microseconds.
    pub work_delay_us: u64,
}
