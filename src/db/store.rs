//! Thin wrapper around the SQLite connection. Table names, column lists and
//! conditions are interpolated verbatim into the SQL text; only values are
//! bound. Callers must pass trusted identifiers and predicates.
//!
//! The connection stays in autocommit mode, so each mutating call is committed
//! before it returns and nothing is rolled back when a later call fails.

use std::fs;
use std::path::Path;

use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use super::error::{Fallback, Result, StoreError};
use super::value::{Row, Value};

/// Condition that selects every row.
pub const ALL_ROWS: &str = "1";

pub struct DataStore {
    conn: Connection,
}

impl DataStore {
    /// Open (and create if needed) the database file, including any missing
    /// parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// `CREATE TABLE name (column_defs)` with the definition text used as is.
    pub fn create_table(&self, name: &str, column_defs: &str) -> Result<()> {
        let sql = format!("CREATE TABLE {name} ({column_defs})");
        self.execute(&sql, &[], Fallback::Schema)?;
        debug!(table = name, "created table");
        Ok(())
    }

    /// Insert one row. `columns` is a comma separated list and `values` are
    /// bound positionally in the same order.
    pub fn insert_row(&self, table: &str, columns: &str, values: &[Value]) -> Result<()> {
        let sql = format!(
            "INSERT INTO {table} ({columns}) VALUES ({})",
            placeholders(values.len())
        );
        self.execute(&sql, values, Fallback::Query)?;
        Ok(())
    }

    /// Set every listed column to its bound value on the rows matching
    /// `condition`. Returns how many rows changed.
    pub fn update_rows(
        &self,
        table: &str,
        columns: &str,
        values: &[Value],
        condition: &str,
    ) -> Result<usize> {
        let assignments = split_columns(columns)
            .enumerate()
            .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {assignments} WHERE {condition}");
        self.execute(&sql, values, Fallback::Query)
    }

    /// Rows matching `condition` projected to `columns`, in whatever order
    /// SQLite yields them. `limit == 0` reads everything.
    pub fn read_rows(
        &self,
        table: &str,
        columns: &str,
        condition: &str,
        limit: usize,
    ) -> Result<Vec<Row>> {
        let sql = format!("SELECT {columns} FROM {table} WHERE {condition}");
        let query_err = |err| StoreError::classify(err, &sql, Fallback::Query);

        let mut stmt = self.conn.prepare(&sql).map_err(query_err)?;
        let width = stmt.column_count();
        let mut rows = stmt.query([]).map_err(query_err)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(query_err)? {
            if limit != 0 && out.len() == limit {
                break;
            }
            let values = (0..width)
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<rusqlite::Result<Row>>()
                .map_err(query_err)?;
            out.push(values);
        }

        Ok(out)
    }

    pub fn drop_table(&self, name: &str) -> Result<()> {
        let sql = format!("DROP TABLE {name}");
        self.execute(&sql, &[], Fallback::Schema)?;
        debug!(table = name, "dropped table");
        Ok(())
    }

    /// Delete the rows matching `condition`, returning how many went away.
    pub fn delete_rows(&self, table: &str, condition: &str) -> Result<usize> {
        let sql = format!("DELETE FROM {table} WHERE {condition}");
        self.execute(&sql, &[], Fallback::Query)
    }

    /// Developer escape hatch for arbitrary statements.
    pub fn execute_raw(&self, sql: &str) -> Result<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|err| StoreError::classify(err, sql, Fallback::Query))
    }

    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";
        let count: i64 = self
            .conn
            .query_row(sql, [name], |row| row.get(0))
            .map_err(|err| StoreError::classify(err, sql, Fallback::Query))?;
        Ok(count > 0)
    }

    pub fn count_rows(&self, table: &str, condition: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE {condition}");
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|err| StoreError::classify(err, &sql, Fallback::Query))
    }

    /// Column names of `table` in declaration order.
    pub fn column_names(&self, table: &str) -> Result<Vec<String>> {
        let sql = format!("SELECT * FROM {table} LIMIT 0");
        let stmt = self
            .conn
            .prepare(&sql)
            .map_err(|err| StoreError::classify(err, &sql, Fallback::Schema))?;
        Ok(stmt.column_names().into_iter().map(str::to_string).collect())
    }

    fn execute(&self, sql: &str, values: &[Value], fallback: Fallback) -> Result<usize> {
        self.conn
            .execute(sql, params_from_iter(values.iter()))
            .map_err(|err| StoreError::classify(err, sql, fallback))
    }
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn split_columns(columns: &str) -> impl Iterator<Item = &str> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|column| !column.is_empty())
}
