//! Task Pipeline Module
//!
//! ## Structure
//!
//! - `task` - `Task` trait, `TaskContext`, `TaskError`
//! - `services` - collaborator handles (`Services`, `EndpointTaskFactory`)
//! - `tasks` - concrete tasks and the declared task order
//! - `runner` - `TaskPipeline`
//! - `report` - `RunState`, `PipelineReport`
//!
//! ## Usage
//!
//! ```ignore
//! use frontgen::pipeline::{Services, TaskPipeline};
//!
//! let services = Services::from_options(&options);
//! let mut pipeline = TaskPipeline::new(options, &services);
//! let report = pipeline.execute()?;
//! ```

mod report;
mod runner;
mod services;
mod task;
pub mod tasks;

pub use report::{PipelineReport, RunState};
pub use runner::TaskPipeline;
pub use services::{EndpointTaskFactory, Services};
pub use task::{Task, TaskContext, TaskError};
