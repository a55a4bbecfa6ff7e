//! SQLite row storage for tracklink.
//!
//! The link table lives under caller-supplied table and column names, so this
//! layer works with quoted identifiers and bound parameter values instead of
//! a fixed schema. No SQL escapes this module.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

/// Connection settings handed through from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Storage driver name. Only "sqlite" is available.
    pub driver: String,

    /// Server host. Unused by the sqlite driver.
    #[serde(default)]
    pub server: Option<String>,

    /// Database to open. For sqlite this is the file path.
    pub database: String,
}

/// Errors surfaced by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The configured driver is not supported.
    #[error("unsupported storage driver '{0}' (only 'sqlite' is available)")]
    UnsupportedDriver(String),

    /// Any error raised by the underlying SQLite engine.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// A fetched row with named-field access.
///
/// NULL columns are absent from the row rather than mapped to a sentinel.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Value of a field, or `None` if it was not selected or was NULL.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Database connection wrapper.
///
/// One instance owns one connection for its lifetime. All calls are
/// synchronous and blocking; callers serialize their own access.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Connect using configured parameters.
    ///
    /// Validates the driver; the database value is handed to SQLite
    /// unchanged.
    pub fn connect(params: &ConnectionParams) -> Result<Self, StorageError> {
        if params.driver != "sqlite" {
            return Err(StorageError::UnsupportedDriver(params.driver.clone()));
        }
        let conn = Connection::open(&params.database)?;
        Ok(Self { conn })
    }

    /// Open a database file directly.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Create the link table and its lookup index if they do not exist.
    pub fn create_link_table(
        &self,
        table: &str,
        resource_field: &str,
        source_field: &str,
        target_field: &str,
    ) -> Result<(), StorageError> {
        let index = quote_ident(&format!("idx_{table}_{source_field}"));
        let table_q = quote_ident(table);
        let resource_q = quote_ident(resource_field);
        let source_q = quote_ident(source_field);
        let target_q = quote_ident(target_field);

        self.conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table_q} (
                id INTEGER PRIMARY KEY,
                {resource_q} TEXT NOT NULL,
                {source_q} TEXT NOT NULL,
                {target_q} TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS {index} ON {table_q}({resource_q}, {source_q});
            "#
        ))?;
        Ok(())
    }

    /// Fetch at most one row matching the filter.
    ///
    /// Only the requested columns are selected and carried into the row.
    pub fn get(
        &self,
        table: &str,
        columns: &[&str],
        filter: &[(&str, &str)],
    ) -> Result<Option<Row>, StorageError> {
        let select = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("SELECT {select} FROM {}", quote_ident(table));
        if !filter.is_empty() {
            sql.push_str(&format!(" WHERE {}", where_clause(filter, 0)));
        }
        sql.push_str(" LIMIT 1");

        let row = self
            .conn
            .query_row(
                &sql,
                params_from_iter(filter.iter().map(|(_, v)| *v)),
                |row| {
                    let mut fields = HashMap::new();
                    for (i, name) in columns.iter().enumerate() {
                        if let Some(text) = value_to_string(row.get::<_, Value>(i)?) {
                            fields.insert((*name).to_string(), text);
                        }
                    }
                    Ok(Row { fields })
                },
            )
            .optional()?;

        Ok(row)
    }

    /// Update the row matching the filter, or insert a new one.
    ///
    /// Returns the number of affected rows. The existence check and the
    /// write are separate statements; atomicity is per statement only.
    pub fn upsert(
        &self,
        table: &str,
        values: &[(&str, &str)],
        filter: &[(&str, &str)],
    ) -> Result<usize, StorageError> {
        let exists_sql = format!(
            "SELECT 1 FROM {} WHERE {} LIMIT 1",
            quote_ident(table),
            where_clause(filter, 0),
        );
        let exists = self
            .conn
            .query_row(
                &exists_sql,
                params_from_iter(filter.iter().map(|(_, v)| *v)),
                |_| Ok(()),
            )
            .optional()?
            .is_some();

        let affected = if exists {
            let assignments = values
                .iter()
                .enumerate()
                .map(|(i, (col, _))| format!("{} = ?{}", quote_ident(col), i + 1))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "UPDATE {} SET {assignments} WHERE {}",
                quote_ident(table),
                where_clause(filter, values.len()),
            );
            let params = values.iter().chain(filter.iter()).map(|(_, v)| *v);
            self.conn.execute(&sql, params_from_iter(params))?
        } else {
            let cols = values
                .iter()
                .map(|(c, _)| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ");
            let placeholders = (1..=values.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "INSERT INTO {} ({cols}) VALUES ({placeholders})",
                quote_ident(table)
            );
            self.conn
                .execute(&sql, params_from_iter(values.iter().map(|(_, v)| *v)))?
        };

        Ok(affected)
    }

    /// Delete rows matching the filter, returning the count removed.
    pub fn delete_rows(
        &self,
        table: &str,
        filter: &[(&str, &str)],
    ) -> Result<usize, StorageError> {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            quote_ident(table),
            where_clause(filter, 0),
        );
        let deleted = self
            .conn
            .execute(&sql, params_from_iter(filter.iter().map(|(_, v)| *v)))?;
        Ok(deleted)
    }

    /// Total row count of a table.
    pub fn count_rows(&self, table: &str) -> Result<i64, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Row counts grouped by one column, ordered by that column.
    pub fn count_rows_grouped(
        &self,
        table: &str,
        group_field: &str,
    ) -> Result<Vec<(String, i64)>, StorageError> {
        let field = quote_ident(group_field);
        let sql = format!(
            "SELECT {field}, COUNT(*) FROM {} GROUP BY {field} ORDER BY {field}",
            quote_ident(table),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

/// Quote an identifier so caller-supplied names cannot break the statement.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `col = ?n AND ...` with placeholders numbered from `offset + 1`.
fn where_clause(filter: &[(&str, &str)], offset: usize) -> String {
    filter
        .iter()
        .enumerate()
        .map(|(i, (col, _))| format!("{} = ?{}", quote_ident(col), offset + i + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}
