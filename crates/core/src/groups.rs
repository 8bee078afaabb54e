//! Assignment-group registry
//!
//! The set of groups a ticket may legitimately be routed to, kept as data
//! rather than a code constant so the allow-list can track the backend
//! without a rebuild. A built-in registry ships with the crate; deployments
//! point the configuration at an external TOML file to override it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use ticketprobe_domain::{Result, TicketProbeError, VerifierConfig};

/// Rendering used when a ticket has no assignment group at all.
pub const UNASSIGNED_GROUP: &str = "Unassigned";

const BUILTIN_GROUPS: &str = include_str!("../../../config/groups.toml");

#[derive(Debug, Deserialize)]
struct GroupsFile {
    groups: Vec<GroupEntry>,
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
    id: u64,
    name: String,
}

/// Allow-list of valid assignment groups with id→name lookup.
///
/// Membership is the pass/fail signal for the group field; the name lookup
/// feeds the distribution statistic and falls back to a synthetic label for
/// ids outside the registry.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: BTreeMap<u64, String>,
}

impl GroupRegistry {
    /// Build a registry from explicit `(id, name)` entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u64, String)>,
    {
        Self { groups: entries.into_iter().collect() }
    }

    /// Parse a registry from TOML text.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Config` for malformed TOML or an empty
    /// group list - an empty allow-list would fail every ticket and is
    /// always a configuration mistake.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let parsed: GroupsFile = toml::from_str(raw)
            .map_err(|e| TicketProbeError::Config(format!("invalid groups file: {e}")))?;
        if parsed.groups.is_empty() {
            return Err(TicketProbeError::Config("groups file defines no groups".to_string()));
        }
        Ok(Self::from_entries(parsed.groups.into_iter().map(|entry| (entry.id, entry.name))))
    }

    /// Load a registry from an external TOML file.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Config` when the file cannot be read or
    /// parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TicketProbeError::Config(format!("failed to read groups file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// The registry embedded in the crate.
    ///
    /// The embedded file is pinned by tests; an edit that breaks it fails
    /// the suite rather than this constructor.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_GROUPS).unwrap_or_default()
    }

    /// The registry a verification run should use: the configured external
    /// file when one is set, the built-in set otherwise.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Config` when a configured file cannot be
    /// read or parsed. A broken override is surfaced rather than silently
    /// reverting to the built-in set, which may be stale.
    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        match &config.groups_file {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Whether the id is a valid routing target.
    pub fn is_valid(&self, group_id: u64) -> bool {
        self.groups.contains_key(&group_id)
    }

    /// Human name for a group id. Ids outside the registry still render,
    /// so the distribution statistic can show where tickets actually
    /// landed.
    pub fn name_of(&self, group_id: u64) -> String {
        self.groups
            .get(&group_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown Group (ID: {group_id})"))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
