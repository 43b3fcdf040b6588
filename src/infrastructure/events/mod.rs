//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for automation
//! - TracingEventSink: structured log records

mod json;
mod tracing;

pub use self::json::JsonEventSink;
pub use self::tracing::TracingEventSink;
