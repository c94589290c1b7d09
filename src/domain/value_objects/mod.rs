//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod path;

pub use hash::ContentHash;
pub use path::{normalize_tracked_path, EntryPath, PathError};
