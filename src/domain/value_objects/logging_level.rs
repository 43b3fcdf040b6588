//! Logging Level Value Object
//!
//! The log verbosity handed to the SMT daemon through the generated artifact.
//! The daemon feeds it to Python's `logging` module, so the spelling is fixed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log level accepted by the SMT daemon
///
/// Parsing is case-sensitive: `"info"` is rejected, only `"INFO"` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoggingLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LoggingLevel {
    /// Every accepted spelling, in severity order
    pub const NAMES: &'static [&'static str] = &["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

    pub const ALL: [LoggingLevel; 5] = [
        LoggingLevel::Debug,
        LoggingLevel::Info,
        LoggingLevel::Warning,
        LoggingLevel::Error,
        LoggingLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoggingLevel::Debug => "DEBUG",
            LoggingLevel::Info => "INFO",
            LoggingLevel::Warning => "WARNING",
            LoggingLevel::Error => "ERROR",
            LoggingLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LoggingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of [`LoggingLevel::NAMES`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown logging level '{0}'")]
pub struct UnknownLoggingLevel(pub String);

impl FromStr for LoggingLevel {
    type Err = UnknownLoggingLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoggingLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownLoggingLevel(s.to_string()))
    }
}
