//! Structured logging.
//!
//! # Responsibilities
//! - Build the env filter and the stdout formatting layer
//! - Under the console profile, print span-close events so spans are visible
//!   without a collector
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - The level filter is attached to the stdout layer only; span export keeps
//!   its own filter so a quiet console still exports every span
//! - Text format by default, JSON lines when requested
//! - Layers are boxed so the collector profile can add its own

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Default log target.
const DEFAULT_LOG_TARGET: &str = "fib_observer";

/// A layer stacked on top of the registry, carrying its own filter.
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the log filter, preferring `RUST_LOG` when it is set.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", DEFAULT_LOG_TARGET, level.to_ascii_lowercase()))
    })
}

/// Stdout layer filtered at `level`. `span_events` adds one line per closed
/// span with its timings.
pub fn console_layer(level: &str, json: bool, span_events: bool) -> BoxedLayer {
    let events = if span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_span_events(events);

    if json {
        layer
            .json()
            .flatten_event(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        layer.with_filter(env_filter(level)).boxed()
    }
}
