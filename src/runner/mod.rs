//! Span-wrapped run loop.
//!
//! # State Machine
//! ```text
//! Idle → Polling → Computing → Reporting → Idle   (per input line)
//! Idle → Terminated                             (input error or cancellation)
//! ```
//!
//! # Spans
//! ```text
//! app.run (run_id)
//!   └─ app.iteration (iteration)
//!        ├─ app.poll
//!        ├─ app.compute (n)
//!        └─ app.report (n)
//! ```
//!
//! # Design Decisions
//! - Spans are attached with `Instrument`/`in_scope`, so they close on every
//!   exit path including `?` returns and a dropped task
//! - Only input errors end the loop; computation errors are reported and the
//!   loop continues
//! - Reader and reporter are injected; nothing is global

pub mod app;
pub mod report;

use thiserror::Error;

use crate::input::InputError;

pub use app::App;
pub use report::{format_outcome, LogReporter, Reporter};

/// Reasons the run loop stops with an error.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading a request failed.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The task running the loop panicked or was aborted.
    #[error("run loop task failed: {0}")]
    Task(String),
}

impl RunError {
    /// The input error that ended the loop, if any.
    pub fn as_input(&self) -> Option<&InputError> {
        match self {
            RunError::Input(e) => Some(e),
            RunError::Task(_) => None,
        }
    }
}
