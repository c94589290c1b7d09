//! Pipeline Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables progress logging, JSON event streams, and test assertions.

use std::path::PathBuf;

/// Event emitted during a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Run started
    Started {
        project_dir: PathBuf,
        task_count: usize,
    },

    /// Task is about to execute
    TaskStarted { index: usize, name: String },

    /// Task predicate was false at pipeline build time
    TaskSkipped { name: String },

    /// Task finished successfully
    TaskCompleted {
        index: usize,
        name: String,
        changed_count: usize,
    },

    /// Task failed; the run stops here
    TaskFailed {
        index: usize,
        name: String,
        error: String,
    },

    /// Run completed
    Completed {
        executed_count: usize,
        tracked_count: usize,
        changed_count: usize,
    },
}

/// Trait for receiving pipeline events
///
/// Implementations can be:
/// - TracingEventSink: log lines via `tracing`
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait PipelineEventSink {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test event sink that records all events
    struct RecordingEventSink {
        events: Arc<Mutex<Vec<PipelineEvent>>>,
    }

    impl PipelineEventSink for RecordingEventSink {
        fn on_event(&self, event: PipelineEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(PipelineEvent::Started {
            project_dir: PathBuf::from("app"),
            task_count: 3,
        });
        sink.on_event(PipelineEvent::TaskSkipped {
            name: "generate-service-worker".to_string(),
        });

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(
            recorded[1],
            PipelineEvent::TaskSkipped {
                name: "generate-service-worker".to_string()
            }
        );
    }
}
