//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fib_requests_total` (counter): requests read from the input stream
//! - `fib_results_total` (counter): reported results by outcome (ok, error)
//! - `fib_input_errors_total` (counter): fatal input errors by kind
//! - `fib_compute_duration_seconds` (histogram): time spent computing
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op, which keeps unit tests free of globals
//! - Console profile keeps values in memory and dumps them at shutdown
//! - Collector profile exposes a Prometheus scrape endpoint

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;

use crate::config::ExporterProfile;
use super::TelemetryError;

pub const REQUESTS_TOTAL: &str = "fib_requests_total";
pub const RESULTS_TOTAL: &str = "fib_results_total";
pub const INPUT_ERRORS_TOTAL: &str = "fib_input_errors_total";
pub const COMPUTE_DURATION_SECONDS: &str = "fib_compute_duration_seconds";

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Installed metrics exporter.
pub enum MetricsHandle {
    /// In-process recorder rendered to the log at shutdown.
    Console(PrometheusHandle),
    /// Scrape listener plus its upkeep task.
    Scrape {
        address: SocketAddr,
        tasks: Vec<JoinHandle<()>>,
    },
}

impl MetricsHandle {
    /// Emit or stop the exporter.
    pub fn flush(self) {
        match self {
            MetricsHandle::Console(handle) => {
                for line in handle
                    .render()
                    .lines()
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                {
                    tracing::info!(target: "fib_observer::metrics", "{}", line);
                }
            }
            MetricsHandle::Scrape { address, tasks } => {
                for task in tasks {
                    task.abort();
                }
                tracing::debug!(%address, "Metrics listener stopped");
            }
        }
    }
}

/// Install the global metrics recorder for the given profile.
///
/// The collector profile must be called from within a Tokio runtime.
pub fn init_metrics(profile: &ExporterProfile) -> Result<MetricsHandle, TelemetryError> {
    match profile {
        ExporterProfile::Console => {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            metrics::set_global_recorder(recorder)
                .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
            Ok(MetricsHandle::Console(handle))
        }
        ExporterProfile::Collector {
            metrics_address, ..
        } => {
            let (recorder, exporter) = PrometheusBuilder::new()
                .with_http_listener(*metrics_address)
                .build()
                .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
            let handle = recorder.handle();
            metrics::set_global_recorder(recorder)
                .map_err(|e| TelemetryError::Metrics(e.to_string()))?;

            let address = *metrics_address;
            let listener = tokio::spawn(async move {
                if exporter.await.is_err() {
                    tracing::error!(%address, "Metrics listener failed");
                }
            });
            let upkeep = tokio::spawn(async move {
                let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
                loop {
                    ticker.tick().await;
                    handle.run_upkeep();
                }
            });

            tracing::info!(%address, "Metrics listener started");
            Ok(MetricsHandle::Scrape {
                address,
                tasks: vec![listener, upkeep],
            })
        }
    }
}

/// Record a request read from the input stream.
pub fn record_request() {
    metrics::counter!(REQUESTS_TOTAL).increment(1);
}

/// Record a reported result.
pub fn record_result(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!(RESULTS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record a fatal input error.
pub fn record_input_error(kind: &'static str) {
    metrics::counter!(INPUT_ERRORS_TOTAL, "kind" => kind).increment(1);
}

/// Record how long a computation took.
pub fn record_compute_duration(start: Instant) {
    metrics::histogram!(COMPUTE_DURATION_SECONDS).record(start.elapsed().as_secs_f64());
}
