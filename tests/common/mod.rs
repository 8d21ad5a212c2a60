//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fib_observer::compute::ComputeError;
use fib_observer::runner::{format_outcome, Reporter};
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Reporter that keeps every report line; clones share the same buffer.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, n: u64, outcome: &Result<u64, ComputeError>) {
        self.lines.lock().unwrap().push(format_outcome(n, outcome));
    }
}

/// A span lifecycle event seen by [`SpanRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanEvent {
    Open { name: String, id: u64 },
    Close { name: String, id: u64 },
}

/// Layer that records span opens and closes in order.
#[derive(Clone, Default)]
pub struct SpanRecorder {
    events: Arc<Mutex<Vec<SpanEvent>>>,
}

impl SpanRecorder {
    pub fn events(&self) -> Vec<SpanEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of opened spans with the given name.
    pub fn opened(&self, name: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SpanEvent::Open { name: n, .. } if n == name))
            .count()
    }

    /// Replay the log and check that every span closes exactly once and that
    /// no two spans named `exclusive` are ever open at the same time.
    pub fn assert_well_nested(&self, exclusive: &str) {
        let mut open: HashMap<u64, String> = HashMap::new();

        for event in self.events() {
            match event {
                SpanEvent::Open { name, id } => {
                    if name == exclusive {
                        assert!(
                            !open.values().any(|n| n == exclusive),
                            "{} opened while another was still open",
                            exclusive
                        );
                    }
                    assert!(open.insert(id, name).is_none(), "span id {} opened twice", id);
                }
                SpanEvent::Close { name, id } => {
                    assert_eq!(
                        open.remove(&id).as_deref(),
                        Some(name.as_str()),
                        "span {} closed twice",
                        id
                    );
                }
            }
        }

        assert!(open.is_empty(), "spans left open: {:?}", open);
    }
}

impl<S> Layer<S> for SpanRecorder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(SpanEvent::Open {
            name: attrs.metadata().name().to_string(),
            id: id.into_u64(),
        });
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let name = ctx
            .span(&id)
            .map(|span| span.name().to_string())
            .unwrap_or_default();
        self.events.lock().unwrap().push(SpanEvent::Close {
            name,
            id: id.into_u64(),
        });
    }
}
