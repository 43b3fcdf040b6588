//! Content Hash Value Object
//!
//! SHA-256 fingerprint of rendered artifact text. Used to tell whether the
//! file on disk still matches what the settings store would generate.

use std::fmt;

use serde::Serialize;

/// Content hash value object
///
/// Always carries the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Hash `content` with SHA-256
    pub fn from_content(content: &str) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(content.as_bytes());
        Self(format!("{}{:x}", Self::PREFIX, digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without the prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First 12 hex chars, for log lines
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
