//! Line reader for incoming requests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::input::InputError;

/// Reads one unsigned integer per line from a buffered stream.
pub struct InputReader<R> {
    inner: R,
    buf: String,
    line: u64,
}

impl InputReader<BufReader<Stdin>> {
    /// Reader over the process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> InputReader<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Wrap a buffered stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Read the next request.
    ///
    /// Returns `InputError::Closed` at end-of-stream. Any other error means
    /// the line could not be used and the caller should stop reading.
    pub async fn poll(&mut self) -> Result<u64, InputError> {
        tracing::info!(line = self.line + 1, "Waiting for next input");

        self.buf.clear();
        let read = self.inner.read_line(&mut self.buf).await?;
        if read == 0 {
            return Err(InputError::Closed);
        }
        self.line += 1;

        parse_line(&self.buf, self.line)
    }
}

/// Parse a single newline-terminated decimal token.
///
/// `line` is only used to annotate errors.
pub fn parse_line(raw: &str, line: u64) -> Result<u64, InputError> {
    let token = match raw.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => {
            return Err(InputError::MissingNewline {
                line,
                token: raw.to_string(),
            })
        }
    };

    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::Malformed {
            line,
            token: token.to_string(),
        });
    }

    token.parse::<u64>().map_err(|_| InputError::OutOfRange {
        line,
        token: token.to_string(),
    })
}
