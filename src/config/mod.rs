//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → config file (TOML, optional) via loader.rs
//!     → environment (OTEL_EXPORTER_OTLP_ENDPOINT, ...) via loader.rs
//!     → CLI overrides (lifecycle::startup)
//!     → validation.rs (semantic checks, ExporterProfile)
//!     → FibConfig (validated, immutable for the life of the process)
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never re-read
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{FibConfig, RunnerConfig, TelemetryConfig};
pub use validation::{ExporterProfile, ValidationError};
