//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `SyncUseCase` - Validate, persist, regenerate config.yaml, reconcile the service
//! - `StatusUseCase` - Compare stored settings with the artifact on disk

pub mod status;
pub mod sync;

pub use status::{ArtifactStatus, StatusReport, StatusUseCase};
pub use sync::{OutcomeError, ReconciliationOutcome, SyncReport, SyncUseCase};
