//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let json = match event {
            PipelineEvent::Started {
                project_dir,
                task_count,
            } => serde_json::json!({
                "event": "start",
                "project_dir": project_dir.display().to_string(),
                "task_count": task_count,
            }),

            PipelineEvent::TaskStarted { index, name } => serde_json::json!({
                "event": "task_start",
                "index": index,
                "task": name,
            }),

            PipelineEvent::TaskSkipped { name } => serde_json::json!({
                "event": "task_skipped",
                "task": name,
            }),

            PipelineEvent::TaskCompleted {
                index,
                name,
                changed_count,
            } => serde_json::json!({
                "event": "task_complete",
                "index": index,
                "task": name,
                "changed": changed_count,
            }),

            PipelineEvent::TaskFailed { index, name, error } => serde_json::json!({
                "event": "task_failed",
                "index": index,
                "task": name,
                "error": error,
            }),

            PipelineEvent::Completed {
                executed_count,
                tracked_count,
                changed_count,
            } => serde_json::json!({
                "event": "complete",
                "status": "success",
                "executed": executed_count,
                "tracked": tracked_count,
                "changed": changed_count,
            }),
        };

        self.write_event(json);
    }
}
