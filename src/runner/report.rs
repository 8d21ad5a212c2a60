//! Result reporting.

use crate::compute::ComputeError;

/// Sink for per-request results.
pub trait Reporter: Send {
    /// Report the outcome of computing Fibonacci(n).
    fn report(&mut self, n: u64, outcome: &Result<u64, ComputeError>);
}

/// Render an outcome as a single report line.
pub fn format_outcome(n: u64, outcome: &Result<u64, ComputeError>) -> String {
    match outcome {
        Ok(value) => format!("Fibonacci({}) = {}", n, value),
        Err(e) => format!("Fibonacci({}): {}", n, e),
    }
}

/// Reports results through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, n: u64, outcome: &Result<u64, ComputeError>) {
        let line = format_outcome(n, outcome);
        match outcome {
            Ok(_) => tracing::info!("{}", line),
            Err(_) => tracing::warn!("{}", line),
        }
    }
}
