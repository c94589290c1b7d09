//! Pipeline run outcome

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::FrontgenResult;
use crate::tracking;

/// Lifecycle of a pipeline. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::NotStarted => "not-started",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Task names in execution order
    pub executed: Vec<String>,
    /// Declared tasks whose predicate was false
    pub skipped: Vec<String>,
    /// Files whose content was written in this run
    pub changed: BTreeSet<PathBuf>,
    /// Every generated or verified file
    pub files: BTreeSet<PathBuf>,
}

impl PipelineReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Tracked files strictly below `root`, same rule as
    /// [`GeneratedFiles::files_under`](crate::tracking::GeneratedFiles::files_under)
    pub fn files_under(&self, root: &Path) -> FrontgenResult<BTreeSet<PathBuf>> {
        tracking::descendants(&self.files, root)
    }
}
