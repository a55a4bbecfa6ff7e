//! Cross-tracker resource linking.
//!
//! A linker records that a source-tracker resource corresponds to a
//! target-tracker resource and answers the reverse question on later sync
//! passes, so an already-mirrored resource is never created twice. The
//! contract is backend-agnostic: the database backend is the production one,
//! the in-memory backend satisfies the same contract for tests.

pub mod db;
pub mod memory;

pub use db::DbLinker;
pub use memory::MemoryLinker;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::resources::Resource;
use crate::storage::StorageError;

/// Errors surfaced by linkers.
#[derive(Debug, thiserror::Error)]
pub enum LinkerError {
    /// No link parameters were supplied at all.
    #[error("link parameters are not configured")]
    MissingLinkParams,

    /// A required link parameter is absent or blank.
    #[error("link parameter '{0}' is missing or empty")]
    EmptyLinkParam(&'static str),

    /// A failure in the storage backend. Never used for a missing link.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Mapping backend contract: look a link up, or record one.
pub trait Linker {
    /// Previously linked target key for a source resource.
    ///
    /// Absence of a link is a normal outcome and returns `Ok(None)`; only
    /// backend failures produce errors.
    fn get_target_key(&self, source: &dyn Resource) -> Result<Option<String>, LinkerError>;

    /// Record that `source` now corresponds to `target`.
    ///
    /// Safe to repeat: an existing record for the same caption and target
    /// key is updated rather than duplicated. Returns the affected row
    /// count.
    fn link(&self, source: &dyn Resource, target: &dyn Resource) -> Result<usize, LinkerError>;
}

/// Names addressing the link table: the table itself and its three
/// meaningful columns. All four values must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkParams {
    #[serde(default)]
    pub table_name: String,

    /// Column holding the resource caption that scopes each record.
    #[serde(default)]
    pub resource_field_name: String,

    /// Column holding the source tracker's key.
    #[serde(default)]
    pub source_field_name: String,

    /// Column holding the target tracker's key.
    #[serde(default)]
    pub target_field_name: String,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            table_name: "links".to_string(),
            resource_field_name: "resource_type".to_string(),
            source_field_name: "source_key".to_string(),
            target_field_name: "target_key".to_string(),
        }
    }
}

impl LinkParams {
    /// Build from a loose key-value mapping, rejecting absent or blank
    /// entries with the offending key named.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, LinkerError> {
        Ok(Self {
            table_name: require(map, "table_name")?,
            resource_field_name: require(map, "resource_field_name")?,
            source_field_name: require(map, "source_field_name")?,
            target_field_name: require(map, "target_field_name")?,
        })
    }

    /// Check that all four names are present. A blank value fails exactly
    /// like an absent one, naming the key.
    pub fn validate(&self) -> Result<(), LinkerError> {
        for (name, value) in [
            ("table_name", &self.table_name),
            ("resource_field_name", &self.resource_field_name),
            ("source_field_name", &self.source_field_name),
            ("target_field_name", &self.target_field_name),
        ] {
            if value.is_empty() {
                return Err(LinkerError::EmptyLinkParam(name));
            }
        }
        Ok(())
    }
}

/// A non-empty value from the mapping, or the key that failed.
fn require(map: &HashMap<String, String>, key: &'static str) -> Result<String, LinkerError> {
    match map.get(key) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(LinkerError::EmptyLinkParam(key)),
    }
}
