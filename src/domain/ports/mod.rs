//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod collaborators;
pub mod file_system;
pub mod pipeline_events;

pub use collaborators::{FrontendScanner, PackageInstaller};
pub use file_system::{FileSystem, FsError, FsResult};
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink};
