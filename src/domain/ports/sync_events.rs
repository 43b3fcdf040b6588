//! Sync Event Port
//!
//! Observable interface for synchronization cycles. Enables structured
//! logging, JSON event streams for automation, and test assertions on the
//! exact state-machine path taken.

use std::path::PathBuf;

use crate::domain::value_objects::{ContentHash, ServiceAction, SyncState};

/// Event emitted during a synchronization cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Cycle started with `field_count` submitted keys
    Started { field_count: usize },

    /// The state machine moved
    Transition { from: SyncState, to: SyncState },

    /// Settings stored
    Persisted { location: String },

    /// Artifact replaced on disk
    ArtifactWritten { path: PathBuf, hash: ContentHash },

    /// Service command about to run
    ServiceCommand { command: String },

    /// Service command failed; the cycle still completes
    ServiceCommandFailed { command: String, error: String },

    /// Cycle reached a terminal state
    Completed {
        state: SyncState,
        persisted: bool,
        artifact_written: bool,
        service_action: ServiceAction,
        error: Option<String>,
    },
}

/// Trait for receiving sync events
///
/// Implementations:
/// - `TracingEventSink`: structured log records
/// - `JsonEventSink`: NDJSON stream for automation
/// - `NoopEventSink`: silent operation
pub trait SyncEventSink: Send + Sync {
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}
}

/// Forwards every event to each inner sink, in order
pub struct FanoutEventSink {
    sinks: Vec<Box<dyn SyncEventSink>>,
}

impl FanoutEventSink {
    pub fn new(sinks: Vec<Box<dyn SyncEventSink>>) -> Self {
        Self { sinks }
    }
}

impl SyncEventSink for FanoutEventSink {
    fn on_event(&self, event: SyncEvent) {
        for sink in &self.sinks {
            sink.on_event(event.clone());
        }
    }
}
