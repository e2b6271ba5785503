//! User-visible conversion warnings.
//!
//! Warnings are collected per conversion run, deduplicated, and surfaced in
//! the final output. They never interrupt the pipeline: a warned node is
//! skipped or degraded, its siblings continue.

use tracing::warn;

/// Ordered, deduplicating collector for conversion warnings.
#[derive(Debug, Default, Clone)]
pub struct Warnings {
    entries: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Duplicate messages are kept once, in first-seen
    /// order.
    pub fn add(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.entries.contains(&message) {
            warn!(warning = %message, "conversion warning");
            self.entries.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Merge another collector into this one, keeping dedup semantics.
    pub fn extend(&mut self, other: Warnings) {
        for entry in other.entries {
            if !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}
