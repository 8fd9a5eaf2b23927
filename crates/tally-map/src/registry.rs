//! Alias registry: logical field names and their candidate header names.
//!
//! Stored on disk as a JSON object mapping each alias to its ordered
//! candidate list:
//!
//! ```json
//! {
//!     "status": ["STATUS", "CASE_STATUS"],
//!     "occupation": ["SOC_NAME", "LCA_CASE_SOC_NAME"]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Mapping from logical alias to the ordered raw header names that may
/// represent it across files. Candidate order matters: the resolver
/// prefers earlier candidates when a header offers more than one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasRegistry {
    aliases: BTreeMap<String, Vec<String>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one candidate header name for `alias`. Registering the
    /// same candidate again is a no-op, so repeated calls are safe.
    pub fn add(&mut self, alias: impl Into<String>, candidate: impl Into<String>) {
        let candidates = self.aliases.entry(alias.into()).or_default();
        let candidate = candidate.into();
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    /// Candidate header names registered for `alias`, in registration order.
    pub fn candidates(&self, alias: &str) -> Option<&[String]> {
        self.aliases.get(alias).map(Vec::as_slice)
    }

    /// True when no alias has any candidate. An empty registry makes the
    /// resolver treat aliases as literal header names.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Iterates registered aliases in name order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// Loads a registry from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read alias registry: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parse alias registry: {}", path.display()))
    }

    /// Writes the registry to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize alias registry")?;
        fs::write(path, json)
            .with_context(|| format!("write alias registry: {}", path.display()))
    }
}
