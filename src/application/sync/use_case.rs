//! Sync Use Case
//!
//! Orchestrates one synchronization cycle:
//! 1. Validate the submitted settings
//! 2. Persist them to the settings store
//! 3. Regenerate and write the daemon's config.yaml
//! 4. Start or stop the service to match `enable_service`
//!
//! Each step runs only if the previous one succeeded, except that a failed
//! service command still ends the cycle in `Done`: by then the store and the
//! artifact already agree, and nothing is rolled back.
//!
//! Steps 2 to 4 run under the store's cycle lock, so concurrent cycles apply
//! one after the other and the artifact always matches the stored settings.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::SettingsModel;
use crate::domain::ports::{
    CommandRunner, FileSystem, NoopEventSink, SettingsRepository, SyncEvent, SyncEventSink,
};
use crate::domain::services::{validate, ArtifactGenerator, ServiceReconciler};
use crate::domain::value_objects::{RawSettings, SyncState};
use crate::error::SyncError;

use super::outcome::{OutcomeError, ReconciliationOutcome, SyncReport};

/// Sync use case - validate, persist, generate, reconcile
pub struct SyncUseCase<SR, FS, CR>
where
    SR: SettingsRepository,
    FS: FileSystem,
    CR: CommandRunner,
{
    store: SR,
    artifacts: ArtifactGenerator<FS>,
    reconciler: ServiceReconciler<CR>,
    artifact_path: PathBuf,
    events: Arc<dyn SyncEventSink>,
}

impl<SR, FS, CR> SyncUseCase<SR, FS, CR>
where
    SR: SettingsRepository,
    FS: FileSystem,
    CR: CommandRunner,
{
    pub fn new(
        store: SR,
        file_system: FS,
        reconciler: ServiceReconciler<CR>,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            artifacts: ArtifactGenerator::new(file_system),
            reconciler,
            artifact_path: artifact_path.into(),
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to `sink`
    pub fn with_events(mut self, sink: Arc<dyn SyncEventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Run one full cycle on submitted form input
    pub fn execute(&self, raw: &RawSettings) -> SyncReport {
        self.events.on_event(SyncEvent::Started {
            field_count: raw.len(),
        });
        let mut cycle = Cycle::new(self.events.as_ref());

        cycle.advance(SyncState::Validating);
        let model = match validate(raw) {
            Ok(model) => model,
            Err(err) => return cycle.abort(err.into()),
        };

        self.run_from_validated(cycle, &model)
    }

    fn run_from_validated(&self, mut cycle: Cycle<'_>, model: &SettingsModel) -> SyncReport {
        cycle.advance(SyncState::Persisting);
        let _lock = match self.store.lock() {
            Ok(lock) => lock,
            Err(err) => return cycle.abort(err.into()),
        };
        if let Err(err) = self.store.persist(model) {
            return cycle.abort(err.into());
        }
        cycle.outcome.persisted = true;
        self.events.on_event(SyncEvent::Persisted {
            location: self.store.location(),
        });

        cycle.advance(SyncState::GeneratingArtifact);
        let doc = self.artifacts.generate(model);
        match self.artifacts.write(&doc, &self.artifact_path) {
            Ok(hash) => {
                cycle.outcome.artifact_written = true;
                self.events.on_event(SyncEvent::ArtifactWritten {
                    path: self.artifact_path.clone(),
                    hash,
                });
            }
            Err(err) => return cycle.abort(err.into()),
        }

        cycle.advance(SyncState::ReconcilingService);
        let command = self.reconciler.command_for(model.enable_service());
        self.events.on_event(SyncEvent::ServiceCommand {
            command: command.to_string(),
        });
        match self.reconciler.apply(model.enable_service()) {
            Ok(action) => cycle.outcome.service_action = action,
            Err(err) => {
                self.events.on_event(SyncEvent::ServiceCommandFailed {
                    command: command.to_string(),
                    error: err.to_string(),
                });
                cycle.record(err.into());
            }
        }

        cycle.advance(SyncState::Done);
        cycle.finish()
    }
}

/// State-machine bookkeeping for a single cycle
struct Cycle<'a> {
    state: SyncState,
    outcome: ReconciliationOutcome,
    error: Option<SyncError>,
    events: &'a dyn SyncEventSink,
}

impl<'a> Cycle<'a> {
    fn new(events: &'a dyn SyncEventSink) -> Self {
        Self {
            state: SyncState::Idle,
            outcome: ReconciliationOutcome::default(),
            error: None,
            events,
        }
    }

    fn advance(&mut self, next: SyncState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "sync state");
        self.events.on_event(SyncEvent::Transition {
            from: self.state,
            to: next,
        });
        self.state = next;
    }

    fn record(&mut self, err: SyncError) {
        self.outcome.error = Some(OutcomeError {
            kind: err.kind(),
            message: err.detail(),
        });
        self.error = Some(err);
    }

    fn abort(mut self, err: SyncError) -> SyncReport {
        tracing::error!(state = %self.state, error = %err, "sync aborted");
        let kind = err.kind();
        self.record(err);
        self.advance(SyncState::Aborted(kind));
        self.finish()
    }

    fn finish(self) -> SyncReport {
        self.events.on_event(SyncEvent::Completed {
            state: self.state,
            persisted: self.outcome.persisted,
            artifact_written: self.outcome.artifact_written,
            service_action: self.outcome.service_action,
            error: self.outcome.error.as_ref().map(|e| e.message.clone()),
        });
        SyncReport {
            state: self.state,
            outcome: self.outcome,
            error: self.error,
        }
    }
}
