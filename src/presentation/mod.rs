//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//! - Log subscriber setup
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `logging` - `tracing-subscriber` initialization
//! - `output` - Output rendering

pub mod cli;
pub mod factory;
pub mod logging;
pub mod output;

pub use cli::{Cli, Commands, InputArgs, ServiceCommand};
