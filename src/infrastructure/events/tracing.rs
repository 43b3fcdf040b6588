//! Tracing Event Sink
//!
//! Turns sync events into structured log records.

use crate::domain::ports::{SyncEvent, SyncEventSink};

/// Event sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl SyncEventSink for TracingEventSink {
    fn on_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::Started { field_count } => {
                tracing::info!(field_count, "sync started");
            }
            SyncEvent::Transition { from, to } => {
                tracing::debug!(%from, %to, "state transition");
            }
            SyncEvent::Persisted { location } => {
                tracing::info!(%location, "settings persisted");
            }
            SyncEvent::ArtifactWritten { path, hash } => {
                tracing::info!(path = %path.display(), hash = hash.short(), "artifact updated");
            }
            SyncEvent::ServiceCommand { command } => {
                tracing::info!(%command, "running service command");
            }
            SyncEvent::ServiceCommandFailed { command, error } => {
                tracing::error!(%command, %error, "service command failed");
            }
            SyncEvent::Completed {
                state,
                persisted,
                artifact_written,
                service_action,
                error,
            } => match error {
                None => tracing::info!(
                    %state,
                    persisted,
                    artifact_written,
                    %service_action,
                    "sync completed"
                ),
                Some(error) => tracing::warn!(
                    %state,
                    persisted,
                    artifact_written,
                    %service_action,
                    %error,
                    "sync completed with error"
                ),
            },
        }
    }
}
