//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     CLI + env + file → Validate → ExporterProfile → Initialize telemetry
//!
//! Supervision (supervisor.rs):
//!     spawn run loop ──┬─ loop ends (EOF / bad input) → exit 1
//!                      └─ interrupt (signals.rs) → cancel ProcessContext → exit 0
//!
//! Shutdown:
//!     TelemetryGuard::shutdown → flush spans, dump console metrics
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and the loop never starts
//! - Cancellation is cooperative through a single ProcessContext
//! - Interrupt gets a short grace period so open spans can close

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod supervisor;

pub use shutdown::ProcessContext;
pub use supervisor::{supervise, Outcome};
