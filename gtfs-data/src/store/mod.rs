//! SQLite sink for reconciled feed tables.
//!
//! A [`SqliteStore`] owns a freshly created database file. All tables of a
//! run are written through one [`StoreTransaction`] and become visible
//! together on [`StoreTransaction::commit`].
#![forbid(unsafe_code)]

mod error;

pub use error::StoreError;

use camino::{Utf8Path, Utf8PathBuf};
use gtfs_core::{Cell, TableDefinition, bind_rows, create_table_statement, insert_statement};
use gtfs_fs::{ensure_parent_dir, remove_file_if_exists};
use log::debug;
use rusqlite::{Connection, Transaction, params_from_iter};

/// A database file created for one conversion run.
#[derive(Debug)]
pub struct SqliteStore {
    path: Utf8PathBuf,
    connection: Connection,
}

impl SqliteStore {
    /// Create an empty database at `path`.
    ///
    /// A file already present at `path` is removed first and missing parent
    /// directories are created.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the previous file cannot be removed, the
    /// directory cannot be created, or SQLite cannot open the file.
    pub fn create(path: &Utf8Path) -> Result<Self, StoreError> {
        if remove_file_if_exists(path).map_err(|source| StoreError::RemoveExisting {
            path: path.to_path_buf(),
            source,
        })? {
            debug!("removed existing database {path}");
        }
        ensure_parent_dir(path).map_err(|source| StoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            connection,
        })
    }

    /// Database path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Begin the single transaction that carries every table of the run.
    ///
    /// # Errors
    /// Returns [`StoreError::BeginTransaction`] when SQLite refuses.
    pub fn transaction(&mut self) -> Result<StoreTransaction<'_>, StoreError> {
        let transaction = self
            .connection
            .transaction()
            .map_err(|source| StoreError::BeginTransaction { source })?;
        Ok(StoreTransaction { transaction })
    }
}

/// Open conversion transaction. Dropping it without committing rolls back.
#[derive(Debug)]
pub struct StoreTransaction<'conn> {
    transaction: Transaction<'conn>,
}

impl StoreTransaction<'_> {
    /// Create `table` and insert `rows`, returning the number of rows written.
    ///
    /// `rows` must already be reconciled to the table's column order. Tables
    /// without rows are created and left empty.
    ///
    /// # Errors
    /// Returns [`StoreError`] naming the table when SQLite rejects the DDL,
    /// the insert statement, or a row.
    pub fn write_table(
        &self,
        table: &TableDefinition,
        rows: &[Vec<Cell>],
    ) -> Result<usize, StoreError> {
        let create = create_table_statement(table);
        debug!("{create}");
        self.transaction
            .execute(&create, [])
            .map_err(|source| StoreError::CreateTable {
                table: table.name().to_owned(),
                source,
            })?;
        if rows.is_empty() {
            return Ok(0);
        }

        let mut statement = self
            .transaction
            .prepare(&insert_statement(table))
            .map_err(|source| StoreError::PrepareInsert {
                table: table.name().to_owned(),
                source,
            })?;
        for (row, values) in bind_rows(rows).enumerate() {
            statement
                .execute(params_from_iter(values))
                .map_err(|source| StoreError::InsertRow {
                    table: table.name().to_owned(),
                    row,
                    source,
                })?;
        }
        Ok(rows.len())
    }

    /// Commit every table written so far.
    ///
    /// # Errors
    /// Returns [`StoreError::Commit`] when SQLite cannot commit.
    pub fn commit(self) -> Result<(), StoreError> {
        self.transaction
            .commit()
            .map_err(|source| StoreError::Commit { source })
    }
}

#[cfg(test)]
mod tests;
