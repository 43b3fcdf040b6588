//! Differ Domain Service
//!
//! Line diff between the artifact on disk and the one the settings would
//! generate.

use similar::{ChangeTag, TextDiff};

/// Result of a diff operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffResult {
    /// e.g. "+5, -3"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Differ;

impl Differ {
    pub fn new() -> Self {
        Self
    }

    pub fn diff(&self, old: &str, new: &str) -> DiffResult {
        let text_diff = TextDiff::from_lines(old, new);

        let mut result = DiffResult::default();

        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => result.deletions += 1,
                ChangeTag::Insert => result.additions += 1,
                ChangeTag::Equal => {}
            }
        }
        result
    }

    /// Unified diff text with `old_label`/`new_label` headers
    pub fn unified(&self, old: &str, new: &str, old_label: &str, new_label: &str) -> String {
        TextDiff::from_lines(old, new)
            .unified_diff()
            .context_radius(3)
            .header(old_label, new_label)
            .to_string()
    }
}
