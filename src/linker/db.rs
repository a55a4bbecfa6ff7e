//! Database-backed linker.

use crate::linker::{LinkParams, Linker, LinkerError};
use crate::resources::Resource;
use crate::storage::{ConnectionParams, Database};

/// Linker persisting records in a relational table addressed by configured
/// table and column names.
///
/// Owns its database connection exclusively for its lifetime. One physical
/// table can serve several resource kinds because every lookup and write is
/// scoped by the resource caption.
pub struct DbLinker {
    db: Database,
    params: LinkParams,
}

impl DbLinker {
    /// Validate the link parameters, then connect.
    ///
    /// No connection is attempted unless every parameter passes validation.
    pub fn new(
        connection: &ConnectionParams,
        link_params: Option<LinkParams>,
    ) -> Result<Self, LinkerError> {
        let params = link_params.ok_or(LinkerError::MissingLinkParams)?;
        params.validate()?;
        let db = Database::connect(connection)?;
        Ok(Self { db, params })
    }

    /// Wrap an already-open database.
    pub fn with_database(db: Database, params: LinkParams) -> Result<Self, LinkerError> {
        params.validate()?;
        Ok(Self { db, params })
    }
}

impl Linker for DbLinker {
    fn get_target_key(&self, source: &dyn Resource) -> Result<Option<String>, LinkerError> {
        let filter = [
            (
                self.params.resource_field_name.as_str(),
                source.resource_caption(),
            ),
            (self.params.source_field_name.as_str(), source.key()),
        ];

        let row = self.db.get(
            &self.params.table_name,
            &[self.params.target_field_name.as_str()],
            &filter,
        )?;

        Ok(row.and_then(|r| r.get(&self.params.target_field_name).map(str::to_string)))
    }

    fn link(&self, source: &dyn Resource, target: &dyn Resource) -> Result<usize, LinkerError> {
        let caption = source.resource_caption();

        let values = [
            (self.params.resource_field_name.as_str(), caption),
            (self.params.source_field_name.as_str(), source.key()),
            (self.params.target_field_name.as_str(), target.key()),
        ];
        // Upsert keyed on (caption, target key): re-linking an existing
        // target absorbs the new source instead of adding a row.
        let filter = [
            (self.params.resource_field_name.as_str(), caption),
            (self.params.target_field_name.as_str(), target.key()),
        ];

        Ok(self.db.upsert(&self.params.table_name, &values, &filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Issue, ResourceRef};
    use crate::storage::StorageError;
    use tempfile::tempdir;

    fn test_params() -> LinkParams {
        LinkParams {
            table_name: "links".to_string(),
            resource_field_name: "kind".to_string(),
            source_field_name: "src".to_string(),
            target_field_name: "tgt".to_string(),
        }
    }

    /// Creates a linker over a fresh database in a temporary directory.
    /// Returns the linker and the temp directory (which must be kept alive).
    fn create_test_linker() -> (DbLinker, tempfile::TempDir) {
        let dir = tempdir().expect("Failed to create temp directory");
        let db = Database::open(&dir.path().join("test.db")).expect("Failed to open database");
        db.create_link_table("links", "kind", "src", "tgt")
            .expect("Failed to create link table");
        let linker = DbLinker::with_database(db, test_params()).expect("Failed to build linker");
        (linker, dir)
    }

    #[test]
    fn test_new_requires_link_params() {
        let dir = tempdir().expect("Failed to create temp directory");
        let connection = ConnectionParams {
            driver: "sqlite".to_string(),
            server: None,
            database: dir.path().join("test.db").display().to_string(),
        };

        let err = DbLinker::new(&connection, None).err().expect("Should fail");
        assert!(matches!(err, LinkerError::MissingLinkParams));
    }

    #[test]
    fn test_new_rejects_blank_param_before_connecting() {
        // An unusable driver would fail at connect time; a validation error
        // surfacing instead proves no connection was attempted.
        let connection = ConnectionParams {
            driver: "odbc".to_string(),
            server: None,
            database: "unused".to_string(),
        };
        let params = LinkParams {
            target_field_name: String::new(),
            ..test_params()
        };

        let err = DbLinker::new(&connection, Some(params))
            .err()
            .expect("Should fail");
        assert!(
            matches!(err, LinkerError::EmptyLinkParam("target_field_name")),
            "Validation should run before the connection is opened"
        );
    }

    #[test]
    fn test_new_connects_with_valid_params() {
        let dir = tempdir().expect("Failed to create temp directory");
        let connection = ConnectionParams {
            driver: "sqlite".to_string(),
            server: None,
            database: dir.path().join("test.db").display().to_string(),
        };

        DbLinker::new(&connection, Some(test_params())).expect("Construction should succeed");
    }

    #[test]
    fn test_lookup_absent_before_link() {
        let (linker, _dir) = create_test_linker();
        let source = ResourceRef::new("issue", "ISSUE-1");

        let target = linker
            .get_target_key(&source)
            .expect("Lookup should not fail on an empty table");

        assert!(target.is_none(), "Unlinked source should have no target");
    }

    #[test]
    fn test_link_then_lookup_roundtrip() {
        let (linker, _dir) = create_test_linker();
        let source = ResourceRef::new("issue", "ISSUE-1");
        let target = ResourceRef::new("issue", "RM-42");

        linker.link(&source, &target).expect("Failed to link");

        let found = linker
            .get_target_key(&source)
            .expect("Failed to look up")
            .expect("Link should exist after linking");
        assert_eq!(found, "RM-42");
    }

    #[test]
    fn test_link_is_idempotent() {
        let (linker, _dir) = create_test_linker();
        let source = Issue::new("PROJ-7");
        let target = Issue::new("RM-7");

        linker.link(&source, &target).expect("First link failed");
        linker.link(&source, &target).expect("Second link failed");

        let found = linker
            .get_target_key(&source)
            .expect("Failed to look up")
            .expect("Link should exist");
        assert_eq!(found, "RM-7");
        assert_eq!(
            linker.db.count_rows("links").expect("Failed to count"),
            1,
            "Repeated link must not duplicate the record"
        );
    }

    #[test]
    fn test_relinking_target_absorbs_new_source() {
        let (linker, _dir) = create_test_linker();
        let first = ResourceRef::new("issue", "ISSUE-1");
        let second = ResourceRef::new("issue", "ISSUE-2");
        let target = ResourceRef::new("issue", "RM-42");

        linker.link(&first, &target).expect("Failed to link first");
        linker.link(&second, &target).expect("Failed to link second");

        // The record for RM-42 now belongs to ISSUE-2; ISSUE-1 lost its row.
        assert_eq!(
            linker
                .get_target_key(&second)
                .expect("Failed to look up")
                .as_deref(),
            Some("RM-42")
        );
        assert!(linker
            .get_target_key(&first)
            .expect("Failed to look up")
            .is_none());
    }

    #[test]
    fn test_new_target_inserts_second_row() {
        let (linker, _dir) = create_test_linker();
        let source = ResourceRef::new("issue", "ISSUE-1");
        let target1 = ResourceRef::new("issue", "RM-1");
        let target2 = ResourceRef::new("issue", "RM-2");

        linker.link(&source, &target1).expect("Failed to link");
        linker.link(&source, &target2).expect("Failed to relink");

        // No record matches (issue, RM-2), so a fresh row is inserted and
        // the lookup (scoped by source key) now finds the earlier row first.
        assert_eq!(linker.db.count_rows("links").expect("Failed to count"), 2);
    }

    #[test]
    fn test_captions_scope_lookups() {
        let (linker, _dir) = create_test_linker();
        let issue = ResourceRef::new("issue", "1");
        let journal = ResourceRef::new("journal", "1");

        linker
            .link(&issue, &ResourceRef::new("issue", "RM-10"))
            .expect("Failed to link issue");

        assert!(
            linker
                .get_target_key(&journal)
                .expect("Failed to look up")
                .is_none(),
            "Same key under another caption must not collide"
        );
    }

    #[test]
    fn test_storage_failure_is_not_absent() {
        let dir = tempdir().expect("Failed to create temp directory");
        let db = Database::open(&dir.path().join("test.db")).expect("Failed to open database");
        // Table deliberately not created.
        let linker = DbLinker::with_database(db, test_params()).expect("Failed to build linker");

        let result = linker.get_target_key(&ResourceRef::new("issue", "ISSUE-1"));

        assert!(
            matches!(result, Err(LinkerError::Storage(StorageError::Sqlite(_)))),
            "A backend failure must surface as an error, never as a missing link"
        );
    }

}
