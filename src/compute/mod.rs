//! Computation subsystem.
//!
//! # Data Flow
//! ```text
//! Request n (u64)
//!     → OverflowPolicy::apply
//!         → fibonacci.rs (wrapping, never fails)
//!         → fibonacci.rs (checked, fails with ComputeError::Overflow)
//!     → Result<u64, ComputeError> handed to the reporter
//! ```
//!
//! # Design Decisions
//! - Pure functions, no I/O and no spans; the runner owns instrumentation
//! - Iterative recurrence keeps stack usage constant for any n
//! - Errors here are per-request and never stop the run loop

pub mod fibonacci;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fibonacci::{checked_fibonacci, fibonacci};

/// Errors produced while computing a single result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// The value does not fit in 64 bits.
    #[error("result overflows u64 (n = {n})")]
    Overflow { n: u64 },
}

/// How the computation treats values past `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Wrap around silently.
    #[default]
    Wrapping,
    /// Report an overflow error for the request.
    Checked,
}

impl OverflowPolicy {
    /// Compute Fibonacci(n) under this policy.
    pub fn apply(self, n: u64) -> Result<u64, ComputeError> {
        match self {
            OverflowPolicy::Wrapping => Ok(fibonacci(n)),
            OverflowPolicy::Checked => checked_fibonacci(n).ok_or(ComputeError::Overflow { n }),
        }
    }
}
