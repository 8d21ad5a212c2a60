//! The application loop.

use std::time::{Duration, Instant};

use tokio::io::AsyncBufRead;
use tracing::Instrument;
use uuid::Uuid;

use crate::compute::{ComputeError, OverflowPolicy};
use crate::config::RunnerConfig;
use crate::input::{InputError, InputReader};
use crate::lifecycle::ProcessContext;
use crate::observability::metrics;
use crate::runner::report::Reporter;
use crate::runner::RunError;

/// How a single iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Iteration {
    Reported,
    Cancelled,
}

/// Reads requests, computes Fibonacci values and reports them.
pub struct App<R, P> {
    input: InputReader<R>,
    reporter: P,
    overflow: OverflowPolicy,
    work_delay: Duration,
}

impl<R, P> App<R, P>
where
    R: AsyncBufRead + Unpin + Send,
    P: Reporter,
{
    /// Create an app with the default wrapping policy and no work delay.
    pub fn new(input: InputReader<R>, reporter: P) -> Self {
        Self {
            input,
            reporter,
            overflow: OverflowPolicy::default(),
            work_delay: Duration::ZERO,
        }
    }

    /// Apply run loop settings.
    pub fn with_config(mut self, config: &RunnerConfig) -> Self {
        self.overflow = config.overflow;
        self.work_delay = Duration::from_micros(config.work_delay_us);
        self
    }

    /// Access the reporter, e.g. to inspect it after a run.
    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Run until the input fails or `ctx` is cancelled.
    ///
    /// Returns `Ok(())` only on cancellation.
    pub async fn run(&mut self, ctx: &ProcessContext) -> Result<(), RunError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("app.run", %run_id);
        self.run_loop(ctx).instrument(span).await
    }

    async fn run_loop(&mut self, ctx: &ProcessContext) -> Result<(), RunError> {
        let mut iteration: u64 = 0;
        loop {
            if ctx.is_cancelled() {
                tracing::info!(iterations = iteration, "Run loop cancelled");
                return Ok(());
            }

            iteration += 1;
            let span = tracing::info_span!("app.iteration", iteration);
            match self.iterate(ctx).instrument(span).await? {
                Iteration::Reported => {}
                Iteration::Cancelled => {
                    tracing::info!(iterations = iteration, "Run loop cancelled while polling");
                    return Ok(());
                }
            }
        }
    }

    async fn iterate(&mut self, ctx: &ProcessContext) -> Result<Iteration, InputError> {
        let polled = self.poll(ctx).instrument(tracing::info_span!("app.poll")).await;
        let n = match polled {
            Ok(Some(n)) => n,
            Ok(None) => return Ok(Iteration::Cancelled),
            Err(e) => {
                metrics::record_input_error(e.kind());
                return Err(e);
            }
        };
        metrics::record_request();

        let outcome = compute(self.overflow, self.work_delay, n)
            .instrument(tracing::info_span!("app.compute", n))
            .await;

        let reporter = &mut self.reporter;
        tracing::info_span!("app.report", n).in_scope(|| reporter.report(n, &outcome));
        metrics::record_result(outcome.is_ok());

        Ok(Iteration::Reported)
    }

    /// Poll the reader, giving up early if the context is cancelled.
    async fn poll(&mut self, ctx: &ProcessContext) -> Result<Option<u64>, InputError> {
        tokio::select! {
            biased;
            _ = ctx.cancelled() => Ok(None),
            polled = self.input.poll() => polled.map(Some),
        }
    }
}

async fn compute(
    overflow: OverflowPolicy,
    work_delay: Duration,
    n: u64,
) -> Result<u64, ComputeError> {
    if !work_delay.is_zero() {
        tokio::time::sleep(work_delay).await;
    }

    let start = Instant::now();
    let outcome = overflow.apply(n);
    metrics::record_compute_duration(start);
    outcome
}
