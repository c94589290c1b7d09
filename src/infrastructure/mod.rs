//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementation (LocalFs)
//! - `events/` - Pipeline event sinks (tracing, NDJSON)
//! - `collaborators` - Default scanner and package installer

pub mod collaborators;
pub mod events;
pub mod fs;

// Re-export for convenience
pub use collaborators::{CommandInstaller, ConfiguredScanner};
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::LocalFs;
