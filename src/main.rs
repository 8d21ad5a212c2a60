//! fib-observer
//!
//! Reads unsigned integers from stdin, one per line, and logs their Fibonacci
//! values. Every read, computation and report is traced.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                  fib-observer                     │
//!                  │                                                   │
//!    stdin ───────▶│  ┌─────────┐    ┌─────────┐    ┌──────────────┐  │
//!                  │  │  input  │───▶│ compute │───▶│    runner    │──┼──▶ log (stdout)
//!                  │  │ reader  │    │fibonacci│    │  reporter    │  │
//!                  │  └─────────┘    └─────────┘    └──────────────┘  │
//!                  │        ▲  app.poll / app.compute / app.report    │
//!                  │        │                                          │
//!                  │  ┌─────┴──────────────────────────────────────┐  │
//!    SIGINT ──────▶│  │ lifecycle: startup → supervise → shutdown  │  │
//!                  │  └────────────────────────────────────────────┘  │
//!                  │  ┌────────────────────────────────────────────┐  │
//!                  │  │ observability: console or OTLP + Prometheus│──┼──▶ collector
//!                  │  └────────────────────────────────────────────┘  │
//!                  └──────────────────────────────────────────────────┘
//! ```
//!
//! # Exit Codes
//! - 0: interrupted
//! - 1: the input stream ended or produced a malformed line
//! - 2: startup failed (configuration or telemetry)

use std::process::ExitCode;

use clap::Parser;
use fib_observer::lifecycle::startup::{self, Options, STARTUP_FAILURE};

#[derive(Parser)]
#[command(name = "fib-observer", version)]
#[command(about = "Traced Fibonacci request loop over stdin", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: Options,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("fib-observer: failed to start runtime: {}", e);
            return ExitCode::from(STARTUP_FAILURE);
        }
    };

    let code = runtime.block_on(startup::launch(cli.options));

    // Stdin is read on a blocking thread that cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    code
}
