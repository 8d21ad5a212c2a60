//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Run loop produces:
//!     → log events (poll start, results, errors)
//!     → spans (app.run > app.iteration > app.poll / app.compute / app.report)
//!     → metrics (counters, histogram)
//!
//! Console profile:
//!     → logging.rs fmt layer (events + span close timings on stdout)
//!     → metrics.rs in-memory recorder, dumped at shutdown
//!
//! Collector profile:
//!     → logging.rs fmt layer (events on stdout)
//!     → otel_trace.rs OTLP/HTTP span export
//!     → metrics.rs Prometheus scrape listener
//! ```
//!
//! # Design Decisions
//! - Initialized exactly once at startup from a resolved ExporterProfile
//! - Teardown is owned by TelemetryGuard: explicit `shutdown()`, with Drop as
//!   the fallback so early returns still flush

pub mod logging;
pub mod metrics;
pub mod otel_trace;

use opentelemetry_sdk::trace::SdkTracerProvider;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{ExporterProfile, TelemetryConfig};
use self::logging::BoxedLayer;
use self::metrics::MetricsHandle;

/// Errors raised while starting or stopping telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),

    #[error("failed to build span exporter: {0}")]
    Exporter(String),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(String),

    #[error("failed to shut down span exporter: {0}")]
    Shutdown(String),
}

/// Owns the process-wide telemetry state.
pub struct TelemetryGuard {
    profile: ExporterProfile,
    tracer_provider: Option<SdkTracerProvider>,
    metrics: Option<MetricsHandle>,
}

impl TelemetryGuard {
    /// The profile telemetry was started with.
    pub fn profile(&self) -> &ExporterProfile {
        &self.profile
    }

    /// Flush and stop every exporter.
    pub fn shutdown(mut self) -> Result<(), TelemetryError> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<(), TelemetryError> {
        if let Some(metrics) = self.metrics.take() {
            metrics.flush();
        }
        if let Some(provider) = self.tracer_provider.take() {
            otel_trace::shutdown(&provider)?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            eprintln!("fib-observer: {}", e);
        }
    }
}

/// Install logging, tracing and metrics for `profile`.
pub fn init_telemetry(
    service_name: &str,
    config: &TelemetryConfig,
    profile: &ExporterProfile,
) -> Result<TelemetryGuard, TelemetryError> {
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    let mut tracer_provider = None;

    match profile {
        ExporterProfile::Console => {
            layers.push(logging::console_layer(&config.log_level, config.json_logs, true));
        }
        ExporterProfile::Collector { trace_endpoint, .. } => {
            layers.push(logging::console_layer(&config.log_level, config.json_logs, false));
            let (layer, provider) = otel_trace::otlp_layer(trace_endpoint, service_name)?;
            layers.push(layer);
            tracer_provider = Some(provider);
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

    let mut guard = TelemetryGuard {
        profile: profile.clone(),
        tracer_provider,
        metrics: None,
    };
    guard.metrics = Some(metrics::init_metrics(profile)?);

    Ok(guard)
}
