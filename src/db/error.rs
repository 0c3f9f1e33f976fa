use std::path::PathBuf;

use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

/// Failures surfaced by [`DataStore`](super::DataStore). Every variant keeps
/// the statement that failed so log lines and error chains point at the exact
/// SQL text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path:?}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database at {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: SqlError,
    },

    /// Table already exists, does not exist, or the definition is invalid.
    #[error("schema error in `{statement}`: {source}")]
    Schema {
        statement: String,
        #[source]
        source: SqlError,
    },

    /// Type or constraint violation on write.
    #[error("constraint violated by `{statement}`: {source}")]
    Constraint {
        statement: String,
        #[source]
        source: SqlError,
    },

    /// Malformed condition, unknown column, bad parameter count.
    #[error("query error in `{statement}`: {source}")]
    Query {
        statement: String,
        #[source]
        source: SqlError,
    },
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Error family an operation reports when SQLite does not flag a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fallback {
    Schema,
    Query,
}

impl StoreError {
    /// Sort a raw SQLite failure into the store taxonomy. Constraint and
    /// datatype mismatch codes always win over the operation's fallback.
    pub(crate) fn classify(err: SqlError, statement: &str, fallback: Fallback) -> Self {
        let statement = statement.to_string();
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) | Some(ErrorCode::TypeMismatch) => {
                StoreError::Constraint {
                    statement,
                    source: err,
                }
            }
            _ => match fallback {
                Fallback::Schema => StoreError::Schema {
                    statement,
                    source: err,
                },
                Fallback::Query => StoreError::Query {
                    statement,
                    source: err,
                },
            },
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, StoreError::Schema { .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint { .. })
    }

    pub fn is_query(&self) -> bool {
        matches!(self, StoreError::Query { .. })
    }
}
