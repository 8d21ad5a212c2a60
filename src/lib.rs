//! Observed Fibonacci request loop.
//!
//! Reads one unsigned integer per line, computes its Fibonacci value, reports
//! it, and traces every step.

// Core pipeline
pub mod compute;
pub mod input;
pub mod runner;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::FibConfig;
pub use lifecycle::ProcessContext;
pub use runner::App;
