//! Input subsystem.
//!
//! # Data Flow
//! ```text
//! line-oriented stream (stdin in production)
//!     → reader.rs (read one line, log poll start)
//!     → parse_line (digits + '\n' → u64)
//!     → Request n, or a fatal InputError
//! ```
//!
//! # Design Decisions
//! - Generic over `AsyncBufRead` so tests feed in-memory streams
//! - Every input error is fatal to the run loop; nothing is retried
//! - The reader is owned by the runner, never shared globally

pub mod reader;

use thiserror::Error;

pub use reader::{parse_line, InputReader};

/// Errors raised while reading a request from the input stream.
#[derive(Debug, Error)]
pub enum InputError {
    /// The stream reached end-of-file.
    #[error("input stream closed")]
    Closed,

    /// The line is not an unsigned decimal integer.
    #[error("line {line}: expected an unsigned integer, got {token:?}")]
    Malformed { line: u64, token: String },

    /// The integer does not fit the accepted range.
    #[error("line {line}: {token} is out of range (max {max})", max = u64::MAX)]
    OutOfRange { line: u64, token: String },

    /// The final line was not terminated by a newline.
    #[error("line {line}: missing trailing newline after {token:?}")]
    MissingNewline { line: u64, token: String },

    /// The underlying stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            InputError::Closed => "closed",
            InputError::Malformed { .. } => "malformed",
            InputError::OutOfRange { .. } => "out_of_range",
            InputError::MissingNewline { .. } => "missing_newline",
            InputError::Io(_) => "io",
        }
    }

    /// True when the stream simply ended.
    pub fn is_eof(&self) -> bool {
        matches!(self, InputError::Closed)
    }
}
