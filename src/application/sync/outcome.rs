//! Sync Outcome
//!
//! Result types for one synchronization cycle.

use serde::Serialize;

use crate::domain::value_objects::{ErrorKind, ServiceAction, SyncState};
use crate::error::SyncError;

/// Error summary carried in the outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// What a cycle achieved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationOutcome {
    pub persisted: bool,
    pub artifact_written: bool,
    pub service_action: ServiceAction,
    pub error: Option<OutcomeError>,
}

impl ReconciliationOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The single line shown to whoever submitted the settings
    pub fn message(&self) -> String {
        let Some(error) = &self.error else {
            return "Configuration saved and service status updated.".to_string();
        };
        match error.kind {
            ErrorKind::Validation => format!("Configuration not saved: {}", error.message),
            ErrorKind::Store => format!("Failed to save configuration: {}", error.message),
            ErrorKind::Io => format!("Failed to generate config.yaml: {}", error.message),
            ErrorKind::Command => format!(
                "Configuration saved, but the service could not be updated: {}",
                error.message
            ),
        }
    }
}

/// Full report of one cycle
#[derive(Debug)]
pub struct SyncReport {
    /// Terminal state reached
    pub state: SyncState,
    pub outcome: ReconciliationOutcome,
    /// The typed error behind `outcome.error`
    pub error: Option<SyncError>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.state == SyncState::Done && self.error.is_none()
    }

    /// JSON form: the outcome plus the terminal state and the message
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state.to_string(),
            "persisted": self.outcome.persisted,
            "artifact_written": self.outcome.artifact_written,
            "service_action": self.outcome.service_action,
            "error": self.outcome.error,
            "message": self.outcome.message(),
        })
    }
}
