//! Run-scoped conversion state.
//!
//! Name counters and the variable-name memo live in an explicit context
//! created per conversion and discarded with it; nothing leaks between
//! overlapping runs.

use scenemark_common::Warnings;
use std::collections::HashMap;

/// Mutable state threaded through one conversion run.
#[derive(Debug, Default)]
pub struct ConversionContext {
    name_counters: HashMap<String, usize>,
    variable_names: HashMap<String, Option<String>>,
    pub warnings: Warnings,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deduplicate a node name: the first occurrence is unchanged, later
    /// occurrences get a zero-padded ordinal suffix (`Icon`, `Icon_01`, …).
    pub fn unique_name(&mut self, name: &str) -> String {
        let clean = name.trim();
        let count = self.name_counters.entry(clean.to_string()).or_insert(0);
        let unique = if *count == 0 {
            clean.to_string()
        } else {
            format!("{clean}_{count:02}")
        };
        *count += 1;
        unique
    }

    pub fn cached_variable_name(&self, variable_id: &str) -> Option<&Option<String>> {
        self.variable_names.get(variable_id)
    }

    pub fn cache_variable_name(&mut self, variable_id: String, name: Option<String>) {
        self.variable_names.insert(variable_id, name);
    }
}

/// Sanitize a variable or layer name for use inside CSS identifiers.
pub fn sanitize_css_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Strip everything but identifier characters and lowercase the rest; used
/// for text segment ids and stylesheet keys.
pub fn identifier_from_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect::<String>()
        .to_lowercase()
}
