//! Errors raised by the SQLite store.

use std::io;

use camino::Utf8PathBuf;
use rusqlite::Error as SqliteError;
use thiserror::Error;

/// Errors raised while materialising tables in SQLite.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Removing a database left by an earlier run failed.
    #[error("failed to remove existing database {path}")]
    RemoveExisting {
        /// Database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Creating the parent directory for the database failed.
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the conversion transaction failed.
    #[error("failed to begin conversion transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// The `CREATE TABLE` statement was rejected.
    #[error("failed to create table `{table}`")]
    CreateTable {
        /// Table being created.
        table: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Preparing the insert statement failed.
    #[error("failed to prepare insert statement for table `{table}`")]
    PrepareInsert {
        /// Table being loaded.
        table: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A row was rejected, typically by a constraint.
    #[error("failed to insert row {row} into table `{table}`")]
    InsertRow {
        /// Table being loaded.
        table: String,
        /// Zero-based row index within the table file.
        row: usize,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the conversion transaction failed.
    #[error("failed to commit conversion transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}
