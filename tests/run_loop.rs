//! Run loop behavior over in-memory input streams.

use std::time::Duration;

use fib_observer::compute::OverflowPolicy;
use fib_observer::config::RunnerConfig;
use fib_observer::input::{InputError, InputReader};
use fib_observer::runner::{App, RunError};
use fib_observer::ProcessContext;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;

mod common;

use common::{RecordingReporter, SpanRecorder};

#[tokio::test]
async fn test_single_line_then_eof() {
    let reporter = RecordingReporter::default();
    let mut app = App::new(InputReader::new(&b"7\n"[..]), reporter.clone());

    let err = app.run(&ProcessContext::new()).await.unwrap_err();

    assert_eq!(reporter.lines(), vec!["Fibonacci(7) = 13".to_string()]);
    assert!(matches!(err, RunError::Input(InputError::Closed)));
}

#[tokio::test]
async fn test_malformed_line_is_fatal() {
    let reporter = RecordingReporter::default();
    let mut app = App::new(InputReader::new(&b"abc\n5\n"[..]), reporter.clone());

    let err = app.run(&ProcessContext::new()).await.unwrap_err();

    assert!(matches!(err, RunError::Input(InputError::Malformed { line: 1, .. })));
    assert!(reporter.lines().is_empty());
}

#[tokio::test]
async fn test_overflow_is_reported_not_fatal() {
    let reporter = RecordingReporter::default();
    let config = RunnerConfig {
        overflow: OverflowPolicy::Checked,
        work_delay_us: 0,
    };
    let mut app =
        App::new(InputReader::new(&b"94\n5\n"[..]), reporter.clone()).with_config(&config);

    let err = app.run(&ProcessContext::new()).await.unwrap_err();

    assert!(matches!(err, RunError::Input(InputError::Closed)));
    assert_eq!(
        reporter.lines(),
        vec![
            "Fibonacci(94): result overflows u64 (n = 94)".to_string(),
            "Fibonacci(5) = 5".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_inputs_past_32_bits_are_computed() {
    let reporter = RecordingReporter::default();
    let config = RunnerConfig {
        overflow: OverflowPolicy::Checked,
        work_delay_us: 0,
    };
    let mut app = App::new(InputReader::new(&b"4294967296\n93\n"[..]), reporter.clone())
        .with_config(&config);

    let err = app.run(&ProcessContext::new()).await.unwrap_err();

    assert!(matches!(err, RunError::Input(InputError::Closed)));
    assert_eq!(
        reporter.lines(),
        vec![
            "Fibonacci(4294967296): result overflows u64 (n = 4294967296)".to_string(),
            "Fibonacci(93) = 12200160415121876738".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_iteration_spans_do_not_overlap() {
    let recorder = SpanRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let reporter = RecordingReporter::default();
    let mut app = App::new(InputReader::new(&b"1\n2\n3\n"[..]), reporter.clone());
    let _ = app.run(&ProcessContext::new()).await;

    assert_eq!(reporter.lines().len(), 3);
    // Three reported iterations plus the one that hit end-of-stream.
    assert_eq!(recorder.opened("app.iteration"), 4);
    assert_eq!(recorder.opened("app.poll"), 4);
    assert_eq!(recorder.opened("app.compute"), 3);
    assert_eq!(recorder.opened("app.report"), 3);
    assert_eq!(recorder.opened("app.run"), 1);
    recorder.assert_well_nested("app.iteration");
}

#[tokio::test]
async fn test_spans_close_on_input_error() {
    let recorder = SpanRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut app = App::new(InputReader::new(&b"4\nnope\n"[..]), RecordingReporter::default());
    assert!(app.run(&ProcessContext::new()).await.is_err());

    assert_eq!(recorder.opened("app.iteration"), 2);
    recorder.assert_well_nested("app.iteration");
}

#[tokio::test]
async fn test_cancel_interrupts_blocked_poll() {
    let recorder = SpanRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let (mut client, server) = tokio::io::duplex(64);
    let reporter = RecordingReporter::default();
    let mut app = App::new(InputReader::new(BufReader::new(server)), reporter.clone());
    let ctx = ProcessContext::new();

    client.write_all(b"6\n").await.unwrap();

    let canceller = ctx.clone();
    let cancel = async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    };
    let (result, _) = tokio::join!(app.run(&ctx), cancel);

    assert!(result.is_ok());
    assert_eq!(reporter.lines(), vec!["Fibonacci(6) = 8".to_string()]);
    recorder.assert_well_nested("app.iteration");
    drop(client);
}
