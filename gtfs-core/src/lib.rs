//! Core schema model for converting GTFS feeds into SQLite.
//!
//! The crate holds the pure parts of a conversion: classifying reference type
//! labels, assembling an immutable [`SchemaCatalog`], reshaping raw feed
//! tables to catalog order with [`reconcile`], and rendering the DDL and DML
//! text for each table. It performs no I/O; fetching schemas, reading feeds
//! and writing databases live in `gtfs-data`.
//!
//! # Examples
//! ```
//! use gtfs_core::{
//!     ColumnSpec, RawTable, SchemaCatalog, StaticPrimaryKeys, TableSpec, create_table_statement,
//!     insert_statement, reconcile,
//! };
//!
//! let specs = vec![TableSpec {
//!     name: "routes".into(),
//!     columns: vec![
//!         ColumnSpec::new("route_id", "Unique ID", "Required"),
//!         ColumnSpec::new("route_type", "Enum", "Required"),
//!     ],
//! }];
//! let catalog = SchemaCatalog::from_specs("gtfs", &specs, &StaticPrimaryKeys::gtfs())?;
//! let routes = catalog.require_table("routes")?;
//!
//! let raw = RawTable::new(
//!     "routes",
//!     vec!["route_type".into(), "route_id".into()],
//!     vec![vec![Some("3".into()), Some("R1".into())]],
//! );
//! let reconciled = reconcile(routes, &raw);
//! assert_eq!(reconciled.rows(), [vec![Some("R1".to_owned()), Some("3".to_owned())]]);
//! assert_eq!(
//!     create_table_statement(routes),
//!     "CREATE TABLE routes (`route_id` TEXT NOT NULL, `route_type` INTEGER NOT NULL, PRIMARY KEY(route_id));"
//! );
//! assert_eq!(insert_statement(routes), "INSERT INTO routes(`route_id`, `route_type`) VALUES (?, ?)");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod alias;
pub mod catalog;
pub mod column;
#[cfg(feature = "serde")]
pub mod definition;
pub mod keys;
pub mod reconcile;
pub mod sql;

pub use alias::{ALIASED_COLUMN, ROW_ID_COLUMN, apply_alias, normalise_header};
pub use catalog::{CatalogError, SchemaCatalog, SchemaMismatch, TableDefinition, TableSpec};
pub use column::{ColumnDefinition, ColumnSpec, ColumnType, REQUIRED_LABEL};
#[cfg(feature = "serde")]
pub use definition::{CatalogDefinition, ColumnRecord, DEFAULT_DATABASE_NAME, TableRecord};
pub use keys::{NoPrimaryKeys, PersistedPrimaryKeys, PrimaryKeySource, StaticPrimaryKeys};
pub use reconcile::{Cell, RawTable, Reconciliation, reconcile};
pub use sql::{bind_rows, create_table_statement, insert_statement};
