//! OpenTelemetry span export.
//!
//! # Responsibilities
//! - Build an OTLP/HTTP span exporter for the collector profile
//! - Bridge `tracing` spans into it via `tracing-opentelemetry`
//! - Flush and stop the exporter at shutdown
//!
//! # Design Decisions
//! - Batch export on the SDK's own worker thread; the run loop never waits on
//!   the network
//! - The provider is returned to the caller instead of being installed
//!   globally, so shutdown ownership stays explicit

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::Layer;
use url::Url;

use super::logging::BoxedLayer;
use super::TelemetryError;

/// Instrumentation scope name.
const TRACER_NAME: &str = "fib-observer";

/// Crate target whose spans are exported.
const EXPORT_TARGET: &str = "fib_observer";

/// Filter for span export, independent of the console log level.
pub fn export_filter() -> Targets {
    Targets::new().with_target(EXPORT_TARGET, Level::INFO)
}

/// Build the OTLP layer and the provider that owns its exporter.
pub fn otlp_layer(
    endpoint: &Url,
    service_name: &str,
) -> Result<(BoxedLayer, SdkTracerProvider), TelemetryError> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint.as_str())
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder()
                .with_service_name(service_name.to_string())
                .build(),
        )
        .build();

    let tracer = provider.tracer(TRACER_NAME);
    let layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(export_filter())
        .boxed();

    tracing::debug!(endpoint = %endpoint, "OTLP span exporter configured");
    Ok((layer, provider))
}

/// Flush pending spans and stop the exporter.
pub fn shutdown(provider: &SdkTracerProvider) -> Result<(), TelemetryError> {
    provider
        .shutdown()
        .map_err(|e| TelemetryError::Shutdown(e.to_string()))
}
