//! In-memory linker.

use std::sync::Mutex;

use crate::linker::{Linker, LinkerError};
use crate::resources::Resource;

#[derive(Debug, Clone)]
struct LinkRow {
    caption: String,
    source: String,
    target: String,
}

/// Linker holding records in memory.
///
/// Satisfies the same contract as the database backend, including the
/// update-by-(caption, target) upsert behavior, so sync code can be
/// exercised without a database file.
#[derive(Default)]
pub struct MemoryLinker {
    rows: Mutex<Vec<LinkRow>>,
}

impl MemoryLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Linker for MemoryLinker {
    fn get_target_key(&self, source: &dyn Resource) -> Result<Option<String>, LinkerError> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .iter()
            .find(|r| r.caption == source.resource_caption() && r.source == source.key())
            .map(|r| r.target.clone()))
    }

    fn link(&self, source: &dyn Resource, target: &dyn Resource) -> Result<usize, LinkerError> {
        let caption = source.resource_caption();
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());

        match rows
            .iter_mut()
            .find(|r| r.caption == caption && r.target == target.key())
        {
            Some(row) => row.source = source.key().to_string(),
            None => rows.push(LinkRow {
                caption: caption.to_string(),
                source: source.key().to_string(),
                target: target.key().to_string(),
            }),
        }

        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceRef;

    #[test]
    fn test_roundtrip() {
        let linker = MemoryLinker::new();
        let source = ResourceRef::new("issue", "ISSUE-1");
        let target = ResourceRef::new("issue", "RM-42");

        assert!(linker
            .get_target_key(&source)
            .expect("Lookup should not fail")
            .is_none());

        linker.link(&source, &target).expect("Failed to link");

        assert_eq!(
            linker
                .get_target_key(&source)
                .expect("Failed to look up")
                .as_deref(),
            Some("RM-42")
        );
    }

    #[test]
    fn test_repeat_link_keeps_one_row() {
        let linker = MemoryLinker::new();
        let source = ResourceRef::new("journal", "17");
        let target = ResourceRef::new("journal", "204");

        linker.link(&source, &target).expect("First link failed");
        linker.link(&source, &target).expect("Second link failed");

        assert_eq!(linker.len(), 1, "Repeated link must not duplicate");
    }

    #[test]
    fn test_upsert_matches_database_backend() {
        let linker = MemoryLinker::new();
        let first = ResourceRef::new("issue", "ISSUE-1");
        let second = ResourceRef::new("issue", "ISSUE-2");
        let target = ResourceRef::new("issue", "RM-42");

        linker.link(&first, &target).expect("Failed to link");
        linker.link(&second, &target).expect("Failed to relink");

        assert_eq!(linker.len(), 1, "Same target should update in place");
        assert!(linker
            .get_target_key(&first)
            .expect("Failed to look up")
            .is_none());
        assert_eq!(
            linker
                .get_target_key(&second)
                .expect("Failed to look up")
                .as_deref(),
            Some("RM-42")
        );

        let other_target = ResourceRef::new("issue", "RM-43");
        linker.link(&second, &other_target).expect("Failed to link");
        assert_eq!(linker.len(), 2, "New target should insert a second row");
    }
}
