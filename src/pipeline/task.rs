//! Task abstraction
//!
//! A task is one step of the pipeline. It receives the run's options, the
//! shared generated-file tracker and the event sink through `TaskContext`.

use thiserror::Error;

use crate::config::Options;
use crate::domain::ports::PipelineEventSink;
use crate::error::FrontgenError;
use crate::tracking::GeneratedFiles;

/// Everything a task may touch while it runs
pub struct TaskContext<'a> {
    pub options: &'a Options,
    pub files: &'a mut GeneratedFiles,
    pub events: &'a dyn PipelineEventSink,
}

/// One pipeline step
pub trait Task {
    /// Stable name used in logs, events and errors
    fn name(&self) -> &str;

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError>;
}

/// Why a task failed
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Something the task depends on is absent
    #[error("precondition not met: {0}")]
    Precondition(String),

    /// Bundle or project metadata did not match
    #[error("validation failed: {0}")]
    Validation(String),

    /// An external tool (package manager, endpoint generator) failed
    #[error("external tool failed: {0}")]
    External(String),

    #[error(transparent)]
    Other(#[from] FrontgenError),
}

impl From<serde_json::Error> for TaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(FrontgenError::Json(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn core_errors_keep_their_message() {
        let err: TaskError = FrontgenError::SourceNotFound {
            path: PathBuf::from("webapp"),
        }
        .into();
        assert_eq!(err.to_string(), "source not found: webapp");
    }

    #[test]
    fn precondition_message() {
        let err = TaskError::Precondition("prod.bundle is missing".to_string());
        assert_eq!(err.to_string(), "precondition not met: prod.bundle is missing");
    }
}
