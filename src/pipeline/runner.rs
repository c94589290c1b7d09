//! Task pipeline
//!
//! Built once from options and collaborators, run once. Tasks run strictly
//! in declaration order; the first failure stops the run. Nothing is
//! retried and nothing already written is rolled back.

use std::sync::Arc;

use crate::config::Options;
use crate::domain::ports::{NoopEventSink, PipelineEvent, PipelineEventSink};
use crate::error::{FrontgenError, FrontgenResult};
use crate::tracking::GeneratedFiles;

use super::report::{PipelineReport, RunState};
use super::services::Services;
use super::task::{Task, TaskContext};
use super::tasks::declared_tasks;

pub struct TaskPipeline {
    options: Options,
    tasks: Vec<Box<dyn Task>>,
    skipped: Vec<String>,
    files: GeneratedFiles,
    events: Arc<dyn PipelineEventSink>,
    state: RunState,
}

impl TaskPipeline {
    /// Select and construct the applicable tasks.
    ///
    /// Every predicate is evaluated here, exactly once; later changes to
    /// the environment do not change which tasks run.
    pub fn new(options: Options, services: &Services) -> Self {
        let mut tasks = Vec::new();
        let mut skipped = Vec::new();

        for declaration in declared_tasks() {
            if !(declaration.predicate)(&options, services) {
                skipped.push(declaration.name.to_string());
                continue;
            }
            match (declaration.construct)(&options, services) {
                Some(task) => tasks.push(task),
                None => skipped.push(declaration.name.to_string()),
            }
        }

        tracing::debug!(
            selected = tasks.len(),
            skipped = skipped.len(),
            "pipeline assembled"
        );
        Self::assemble(options, tasks, skipped)
    }

    /// Pipeline over an explicit task list, in the given order
    pub fn from_tasks(options: Options, tasks: Vec<Box<dyn Task>>) -> Self {
        Self::assemble(options, tasks, Vec::new())
    }

    fn assemble(options: Options, tasks: Vec<Box<dyn Task>>, skipped: Vec<String>) -> Self {
        Self {
            options,
            tasks,
            skipped,
            files: GeneratedFiles::new(),
            events: Arc::new(NoopEventSink),
            state: RunState::NotStarted,
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn PipelineEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Names of the selected tasks, in run order
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Files tracked so far. Still readable after a failed run.
    pub fn generated_files(&self) -> &GeneratedFiles {
        &self.files
    }

    /// Run every selected task once, in order.
    pub fn execute(&mut self) -> FrontgenResult<PipelineReport> {
        if self.state != RunState::NotStarted {
            return Err(FrontgenError::AlreadyExecuted {
                state: self.state.to_string(),
            });
        }
        self.state = RunState::Running;

        self.events.on_event(PipelineEvent::Started {
            project_dir: self.options.project_directory(),
            task_count: self.tasks.len(),
        });
        for name in &self.skipped {
            self.events
                .on_event(PipelineEvent::TaskSkipped { name: name.clone() });
        }

        let mut executed = Vec::with_capacity(self.tasks.len());
        for (index, task) in self.tasks.iter().enumerate() {
            let name = task.name().to_string();
            self.events.on_event(PipelineEvent::TaskStarted {
                index,
                name: name.clone(),
            });

            let changed_before = self.files.changed().len();
            let mut ctx = TaskContext {
                options: &self.options,
                files: &mut self.files,
                events: self.events.as_ref(),
            };
            if let Err(err) = task.execute(&mut ctx) {
                self.state = RunState::Failed;
                let message = err.to_string();
                self.events.on_event(PipelineEvent::TaskFailed {
                    index,
                    name: name.clone(),
                    error: message.clone(),
                });
                return Err(FrontgenError::TaskFailed {
                    task: name,
                    message,
                });
            }

            self.events.on_event(PipelineEvent::TaskCompleted {
                index,
                name: name.clone(),
                changed_count: self.files.changed().len() - changed_before,
            });
            executed.push(name);
        }

        self.state = RunState::Completed;
        self.events.on_event(PipelineEvent::Completed {
            executed_count: executed.len(),
            tracked_count: self.files.len(),
            changed_count: self.files.changed().len(),
        });

        Ok(PipelineReport {
            executed,
            skipped: self.skipped.clone(),
            changed: self.files.changed().clone(),
            files: self.files.files().clone(),
        })
    }
}

impl std::fmt::Debug for TaskPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPipeline")
            .field("tasks", &self.task_names())
            .field("skipped", &self.skipped)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
