//! JSON Event Sink
//!
//! Outputs sync events as NDJSON for automation consumption.

use crate::domain::ports::{SyncEvent, SyncEventSink};
use crate::domain::value_objects::SyncState;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl SyncEventSink for JsonEventSink {
    fn on_event(&self, event: SyncEvent) {
        let json = match event {
            SyncEvent::Started { field_count } => {
                serde_json::json!({
                    "event": "start",
                    "command": "save",
                    "field_count": field_count,
                })
            }

            SyncEvent::Transition { from, to } => {
                serde_json::json!({
                    "event": "transition",
                    "from": from.to_string(),
                    "to": to.to_string(),
                })
            }

            SyncEvent::Persisted { location } => {
                serde_json::json!({
                    "event": "persisted",
                    "location": location,
                })
            }

            SyncEvent::ArtifactWritten { path, hash } => {
                serde_json::json!({
                    "event": "artifact_written",
                    "path": path.display().to_string(),
                    "hash": hash.as_str(),
                })
            }

            SyncEvent::ServiceCommand { command } => {
                serde_json::json!({
                    "event": "service_command",
                    "command": command,
                })
            }

            SyncEvent::ServiceCommandFailed { command, error } => {
                serde_json::json!({
                    "event": "service_command_failed",
                    "command": command,
                    "error": error,
                })
            }

            SyncEvent::Completed {
                state,
                persisted,
                artifact_written,
                service_action,
                error,
            } => {
                let status = match (&state, &error) {
                    (_, None) => "success",
                    (SyncState::Done, Some(_)) => "partial",
                    _ => "failed",
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "save",
                    "status": status,
                    "state": state.to_string(),
                    "persisted": persisted,
                    "artifact_written": artifact_written,
                    "service_action": service_action.as_str(),
                    "error": error,
                })
            }
        };

        self.write_event(json);
    }
}
