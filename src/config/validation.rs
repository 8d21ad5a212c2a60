//! Configuration validation and exporter profile resolution.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: FibConfig → Result<(), Vec<ValidationError>>
//! - The exporter profile is derived from validated settings exactly once

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{FibConfig, TelemetryConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Path the OTLP/HTTP trace receiver listens on.
pub const OTLP_TRACES_PATH: &str = "/v1/traces";

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service_name must not be empty")]
    EmptyServiceName,

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),

    #[error("invalid collector endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Where traces and metrics are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExporterProfile {
    /// Spans and metrics go to the local console.
    Console,
    /// Spans are pushed over OTLP/HTTP, metrics are scraped over Prometheus.
    Collector {
        trace_endpoint: Url,
        metrics_address: SocketAddr,
    },
}

impl ExporterProfile {
    /// Resolve the profile from telemetry settings.
    ///
    /// A missing or blank endpoint selects the console profile.
    pub fn resolve(config: &TelemetryConfig) -> Result<Self, ValidationError> {
        let endpoint = match config.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => endpoint,
            _ => return Ok(ExporterProfile::Console),
        };

        let trace_endpoint = trace_endpoint(endpoint)?;
        let metrics_address = config
            .metrics_address
            .parse()
            .map_err(|_| ValidationError::InvalidMetricsAddress(config.metrics_address.clone()))?;

        Ok(ExporterProfile::Collector {
            trace_endpoint,
            metrics_address,
        })
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExporterProfile::Console => "console",
            ExporterProfile::Collector { .. } => "collector",
        }
    }
}

fn trace_endpoint(endpoint: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let mut url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    // A bare collector address gets the standard OTLP traces path.
    if url.path() == "/" || url.path().is_empty() {
        url.set_path(OTLP_TRACES_PATH);
    }
    Ok(url)
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &FibConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    let level = config.telemetry.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.telemetry.log_level.clone()));
    }

    if let Err(e) = ExporterProfile::resolve(&config.telemetry) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
