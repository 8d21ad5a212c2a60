//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration once (file, environment, CLI)
//! - Initialize telemetry for the resolved exporter profile
//! - Run the supervised loop over stdin and map the outcome to an exit code
//!
//! # Design Decisions
//! - Fail fast: startup errors print to stderr, since logging may not exist yet
//! - Telemetry is torn down on every exit path after a successful start

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use thiserror::Error;

use crate::compute::OverflowPolicy;
use crate::config::loader::{discover, ConfigError};
use crate::config::validation::validate_config;
use crate::config::{ExporterProfile, FibConfig};
use crate::input::InputReader;
use crate::lifecycle::{signals, supervise, Outcome, ProcessContext};
use crate::observability::{init_telemetry, TelemetryError, TelemetryGuard};
use crate::runner::{App, LogReporter};

/// Exit code for configuration or telemetry failures.
pub const STARTUP_FAILURE: u8 = 2;

/// Errors that prevent the run loop from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Command-line overrides. Anything left unset falls back to the
/// environment, then the config file, then defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct Options {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Collector endpoint (selects the remote exporter profile)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Service name attached to traces
    #[arg(long)]
    pub service_name: Option<String>,

    /// Overflow behavior for large inputs
    #[arg(long, value_enum)]
    pub overflow: Option<OverflowPolicy>,

    /// Simulated work per computation, in microseconds
    #[arg(long)]
    pub work_delay_us: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Options {
    /// Overlay these options on `config`.
    pub fn apply(&self, config: &mut FibConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.telemetry.endpoint = Some(endpoint.clone());
        }
        if let Some(name) = &self.service_name {
            config.service_name = name.clone();
        }
        if let Some(overflow) = self.overflow {
            config.runner.overflow = overflow;
        }
        if let Some(delay) = self.work_delay_us {
            config.runner.work_delay_us = delay;
        }
        if let Some(level) = &self.log_level {
            config.telemetry.log_level = level.clone();
        }
        if self.json {
            config.telemetry.json_logs = true;
        }
    }
}

/// Resolve the final configuration and its exporter profile.
pub fn resolve(options: &Options) -> Result<(FibConfig, ExporterProfile), StartupError> {
    let mut config = discover(options.config.as_deref())?;
    options.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;
    let profile = ExporterProfile::resolve(&config.telemetry)
        .map_err(|e| ConfigError::Validation(vec![e]))?;

    Ok((config, profile))
}

/// Resolve configuration and bring up telemetry.
pub fn start(options: &Options) -> Result<(FibConfig, TelemetryGuard), StartupError> {
    let (config, profile) = resolve(options)?;
    let telemetry = init_telemetry(&config.service_name, &config.telemetry, &profile)?;
    Ok((config, telemetry))
}

/// Run the whole process: startup, supervised loop over stdin, teardown.
pub async fn launch(options: Options) -> ExitCode {
    let (config, telemetry) = match start(&options) {
        Ok(started) => started,
        Err(e) => {
            eprintln!("fib-observer: {}", e);
            return ExitCode::from(STARTUP_FAILURE);
        }
    };

    tracing::info!(
        service = %config.service_name,
        profile = telemetry.profile().name(),
        overflow = ?config.runner.overflow,
        "fib-observer starting"
    );

    let app = App::new(InputReader::stdin(), LogReporter).with_config(&config.runner);
    let outcome = supervise(app, ProcessContext::new(), signals::interrupt()).await;

    match &outcome {
        Outcome::Failed(e) => tracing::error!(error = %e, "Run loop failed"),
        Outcome::Completed => tracing::info!("Run loop finished"),
        Outcome::Interrupted => {}
    }

    if let Err(e) = telemetry.shutdown() {
        eprintln!("fib-observer: {}", e);
    }

    ExitCode::from(outcome.exit_code())
}
