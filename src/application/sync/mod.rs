//! Sync Module
//!
//! One synchronization cycle for the SMT plugin settings.
//!
//! ## Structure
//!
//! - `outcome` - Result types (`ReconciliationOutcome`, `SyncReport`)
//! - `use_case` - Core orchestration (`SyncUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use smt_sync::application::sync::SyncUseCase;
//!
//! let use_case = SyncUseCase::new(store, fs, reconciler, artifact_path);
//! let report = use_case.execute(&raw);
//! println!("{}", report.outcome.message());
//! ```

mod outcome;
mod use_case;

pub use outcome::{OutcomeError, ReconciliationOutcome, SyncReport};
pub use use_case::SyncUseCase;
