//! Synchronization state machine values
//!
//! ```text
//! Idle -> Validating -> Persisting -> GeneratingArtifact -> ReconcilingService -> Done
//!            \______________\________________\____________________> Aborted(kind)
//! ```

use std::fmt;

use serde::Serialize;

/// Which stage of the cycle an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Store,
    Io,
    Command,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Store => "store",
            ErrorKind::Io => "io",
            ErrorKind::Command => "command",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one synchronization cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum SyncState {
    Idle,
    Validating,
    Persisting,
    GeneratingArtifact,
    ReconcilingService,
    Done,
    Aborted(ErrorKind),
}

impl SyncState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncState::Done | SyncState::Aborted(_))
    }

    /// Whether the state machine permits moving from `self` to `next`
    pub fn can_transition_to(&self, next: SyncState) -> bool {
        use SyncState::*;
        match (self, next) {
            (Idle, Validating)
            | (Validating, Persisting)
            | (Persisting, GeneratingArtifact)
            | (GeneratingArtifact, ReconcilingService)
            | (ReconcilingService, Done) => true,
            (current, Aborted(_)) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Idle => f.write_str("idle"),
            SyncState::Validating => f.write_str("validating"),
            SyncState::Persisting => f.write_str("persisting"),
            SyncState::GeneratingArtifact => f.write_str("generating-artifact"),
            SyncState::ReconcilingService => f.write_str("reconciling-service"),
            SyncState::Done => f.write_str("done"),
            SyncState::Aborted(kind) => write!(f, "aborted({})", kind),
        }
    }
}

/// What the reconciler did to the external service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAction {
    #[default]
    None,
    Started,
    Stopped,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::None => "none",
            ServiceAction::Started => "started",
            ServiceAction::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
