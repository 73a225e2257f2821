//! Persisted catalog definition document.
//!
//! The JSON layout mirrors the catalog:
//!
//! ```json
//! {
//!   "database_name": "gtfs",
//!   "tables": {
//!     "routes": {
//!       "table_name": "routes",
//!       "columns": [
//!         {"column_name": "route_id", "column_type": "TEXT", "is_not_null": true, "is_primary_key": true}
//!       ],
//!       "primary_keys": ["route_id"]
//!     }
//!   }
//! }
//! ```
//!
//! `database_name`, `is_primary_key` and `primary_keys` may be omitted when
//! reading. Key membership is always derived from `primary_keys`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, SchemaCatalog, TableDefinition};
use crate::column::{ColumnDefinition, ColumnType};
use crate::keys::PersistedPrimaryKeys;

/// Catalog name used when a document omits `database_name`.
pub const DEFAULT_DATABASE_NAME: &str = "gtfs_database";

fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_owned()
}

/// One column entry of a persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    /// Column name; the `stop_id` alias is applied on load.
    pub column_name: String,
    /// Stored type label, classified on load.
    pub column_type: String,
    /// Whether the column rejects nulls.
    pub is_not_null: bool,
    /// Informational; key membership comes from the table's `primary_keys`.
    #[serde(default)]
    pub is_primary_key: bool,
}

/// One persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Table name.
    pub table_name: String,
    /// Columns in definition order.
    pub columns: Vec<ColumnRecord>,
    /// Ordered primary-key column names.
    #[serde(default)]
    pub primary_keys: Vec<String>,
}

/// Serialisable form of a [`SchemaCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    /// Catalog name.
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Tables keyed by name, in catalog order.
    pub tables: IndexMap<String, TableRecord>,
}

impl CatalogDefinition {
    /// Capture `catalog` as a persisted document.
    #[must_use]
    pub fn from_catalog(catalog: &SchemaCatalog) -> Self {
        let tables = catalog
            .tables()
            .map(|table| (table.name().to_owned(), TableRecord::from_table(table)))
            .collect();
        Self {
            database_name: catalog.name().to_owned(),
            tables,
        }
    }

    /// Rebuild the catalog, taking primary keys verbatim from each record.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownPrimaryKey`] when a record lists a key
    /// that is not one of its columns.
    ///
    /// # Examples
    /// ```
    /// use gtfs_core::CatalogDefinition;
    ///
    /// let json = r#"{"tables": {"agency": {
    ///     "table_name": "agency",
    ///     "columns": [{"column_name": "agency_id", "column_type": "TEXT", "is_not_null": false}],
    ///     "primary_keys": ["agency_id"]
    /// }}}"#;
    /// let catalog = CatalogDefinition::from_json(json)?.into_catalog()?;
    /// assert_eq!(catalog.name(), "gtfs_database");
    /// let agency = catalog.table("agency").expect("agency table");
    /// assert!(agency.column("agency_id").is_some_and(|c| !c.is_nullable()));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn into_catalog(self) -> Result<SchemaCatalog, CatalogError> {
        let keys: PersistedPrimaryKeys = self
            .tables
            .values()
            .map(|record| (record.table_name.clone(), record.primary_keys.clone()))
            .collect();
        let tables = self
            .tables
            .values()
            .map(|record| {
                let columns = record
                    .columns
                    .iter()
                    .map(|column| {
                        ColumnDefinition::new(
                            &column.column_name,
                            ColumnType::classify(&column.column_type),
                            !column.is_not_null,
                        )
                    })
                    .collect();
                TableDefinition::build(&record.table_name, columns, &keys)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SchemaCatalog::new(self.database_name, tables))
    }

    /// Decode a document from JSON text.
    ///
    /// # Errors
    /// Returns the decoder error for malformed or incomplete documents.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Encode the document as pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates encoder failures.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl TableRecord {
    fn from_table(table: &TableDefinition) -> Self {
        Self {
            table_name: table.name().to_owned(),
            columns: table
                .columns()
                .iter()
                .map(|column| ColumnRecord {
                    column_name: column.name().to_owned(),
                    column_type: column.column_type().as_sql().to_owned(),
                    is_not_null: !column.is_nullable(),
                    is_primary_key: column.is_primary_key(),
                })
                .collect(),
            primary_keys: table.primary_keys().to_vec(),
        }
    }
}
