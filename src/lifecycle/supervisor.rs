//! Runs the app as a task and races it against an interrupt.

use std::future::Future;
use std::time::Duration;

use tokio::io::AsyncBufRead;

use crate::lifecycle::ProcessContext;
use crate::runner::{App, Reporter, RunError};

/// How long an interrupted run loop gets to wind down.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// How the supervised run ended.
#[derive(Debug)]
pub enum Outcome {
    /// An interrupt arrived first.
    Interrupted,
    /// The loop stopped on its own without an error.
    Completed,
    /// The loop stopped with an error.
    Failed(RunError),
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Interrupted | Outcome::Completed => 0,
            Outcome::Failed(_) => 1,
        }
    }
}

/// Spawn `app` and wait for whichever comes first: its completion or `interrupt`.
///
/// On interrupt the context is cancelled and the task is given
/// [`SHUTDOWN_GRACE`] to finish before it is aborted.
pub async fn supervise<R, P, S>(app: App<R, P>, ctx: ProcessContext, interrupt: S) -> Outcome
where
    R: AsyncBufRead + Unpin + Send + 'static,
    P: Reporter + 'static,
    S: Future<Output = ()>,
{
    let task_ctx = ctx.clone();
    let mut task = tokio::spawn(async move {
        let mut app = app;
        app.run(&task_ctx).await
    });

    tokio::select! {
        _ = interrupt => {
            ctx.cancel();
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
                tracing::warn!(
                    grace_ms = SHUTDOWN_GRACE.as_millis() as u64,
                    "Run loop still busy, aborting"
                );
                task.abort();
            }
            tracing::info!("goodbye");
            Outcome::Interrupted
        }
        joined = &mut task => match joined {
            Ok(Ok(())) => Outcome::Completed,
            Ok(Err(e)) => Outcome::Failed(e),
            Err(e) => Outcome::Failed(RunError::Task(e.to_string())),
        },
    }
}
