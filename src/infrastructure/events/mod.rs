//! Event Sink Implementations
//!
//! Provides concrete implementations of PipelineEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: log lines through `tracing`

mod json;
mod log;

pub use json::JsonEventSink;
pub use log::TracingEventSink;
