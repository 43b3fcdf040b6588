//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{StatusUseCase, SyncUseCase};
use crate::config::AppConfig;
use crate::domain::ports::SyncEventSink;
use crate::domain::services::{ServiceReconciler, ServiceTarget};
use crate::infrastructure::{LocalFs, SystemCommandRunner, TomlSettingsRepository};

/// Type alias for the concrete SyncUseCase with all dependencies
pub type ConcreteSyncUseCase = SyncUseCase<TomlSettingsRepository, LocalFs, SystemCommandRunner>;

/// Type alias for the concrete StatusUseCase with all dependencies
pub type ConcreteStatusUseCase = StatusUseCase<TomlSettingsRepository, LocalFs>;

pub fn create_settings_repository(config: &AppConfig) -> TomlSettingsRepository {
    TomlSettingsRepository::new(config.store.path.clone())
}

pub fn create_reconciler(config: &AppConfig) -> ServiceReconciler<SystemCommandRunner> {
    ServiceReconciler::new(
        SystemCommandRunner::new(),
        ServiceTarget::new(config.service.program.as_str(), config.service.name.as_str()),
        config.service.timeout(),
    )
}

/// Create a sync use case reporting to `events`
pub fn create_sync_use_case(
    config: &AppConfig,
    events: Arc<dyn SyncEventSink>,
) -> ConcreteSyncUseCase {
    SyncUseCase::new(
        create_settings_repository(config),
        LocalFs::new(),
        create_reconciler(config),
        config.artifact.path.clone(),
    )
    .with_events(events)
}

pub fn create_status_use_case(config: &AppConfig) -> ConcreteStatusUseCase {
    StatusUseCase::new(
        create_settings_repository(config),
        LocalFs::new(),
        config.artifact.path.clone(),
    )
}
