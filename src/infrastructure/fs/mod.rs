//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod local;

pub use local::{set_owner_writable, LocalFs};
