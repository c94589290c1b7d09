//! Tracing Event Sink
//!
//! Turns pipeline events into `tracing` log lines.

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

/// Event sink that logs through the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl PipelineEventSink for TracingEventSink {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Started {
                project_dir,
                task_count,
            } => {
                tracing::info!(project = %project_dir.display(), task_count, "pipeline started");
            }
            PipelineEvent::TaskStarted { index, name } => {
                tracing::debug!(index, task = %name, "task started");
            }
            PipelineEvent::TaskSkipped { name } => {
                tracing::debug!(task = %name, "task not applicable, skipped");
            }
            PipelineEvent::TaskCompleted {
                index,
                name,
                changed_count,
            } => {
                tracing::info!(index, task = %name, changed = changed_count, "task completed");
            }
            PipelineEvent::TaskFailed { index, name, error } => {
                tracing::error!(index, task = %name, %error, "task failed");
            }
            PipelineEvent::Completed {
                executed_count,
                tracked_count,
                changed_count,
            } => {
                tracing::info!(
                    executed = executed_count,
                    tracked = tracked_count,
                    changed = changed_count,
                    "pipeline completed"
                );
            }
        }
    }
}
