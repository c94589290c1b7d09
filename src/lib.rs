//! frontgen - frontend asset generation pipeline
//!
//! Prepares a web application's client-side assets: generates entry files,
//! keeps `package.json` and the import list in sync, restores or packs the
//! production bundle, and checks a pre-built bundle against the project.
//! Every file the pipeline produces is tracked so callers can tell generated
//! files from hand-written ones.

pub mod bundle;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod pipeline;
pub mod tracking;
pub mod validation;

// Re-exports for convenience
pub use bundle::{pack, unpack, BundleStats, BundleSummary};
pub use config::{ConfigWarning, Options};
pub use error::{FrontgenError, FrontgenResult};
pub use pipeline::{PipelineReport, RunState, Services, Task, TaskContext, TaskError, TaskPipeline};
pub use tracking::GeneratedFiles;
pub use validation::{is_subset_with_report, SubsetReport};
