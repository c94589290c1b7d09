//! Error types for frontgen
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for frontgen operations
pub type FrontgenResult<T> = Result<T, FrontgenError>;

/// Main error type for frontgen operations
#[derive(Error, Debug)]
pub enum FrontgenError {
    /// Writing (or reading back for comparison) a generated file failed
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: crate::domain::ports::FsError,
    },

    /// Bundle source directory does not exist
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Archive could not be read back completely and consistently
    #[error("malformed archive '{path}': {message}")]
    MalformedArchive { path: PathBuf, message: String },

    /// Symlink, device or other entry a bundle cannot carry
    #[error("unsupported entry '{path}': {message}")]
    UnsupportedEntry { path: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Caller passed an argument the operation refuses
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pipeline task failed; remaining tasks were not run
    #[error("task '{task}' failed: {message}")]
    TaskFailed { task: String, message: String },

    /// `execute` was called on a pipeline that already ran
    #[error("pipeline already executed (state: {state})")]
    AlreadyExecuted { state: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
