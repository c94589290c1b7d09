//! Domain Layer
//!
//! Value types and the port traits the rest of the crate is written against.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ContentHash, EntryPath)
//! - `ports/` - Interface definitions for infrastructure (FileSystem,
//!   PipelineEventSink, FrontendScanner, PackageInstaller)

pub mod ports;
pub mod value_objects;
