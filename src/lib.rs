//! Facade crate for the GTFS to SQLite converter.
//!
//! This crate re-exports the schema model and exposes the conversion driver,
//! feed sources and storage writer behind the `data` feature.

#![forbid(unsafe_code)]

pub use gtfs_core::{
    CatalogError, Cell, ColumnDefinition, ColumnSpec, ColumnType, NoPrimaryKeys,
    PersistedPrimaryKeys, PrimaryKeySource, RawTable, Reconciliation, SchemaCatalog,
    SchemaMismatch, StaticPrimaryKeys, TableDefinition, TableSpec, create_table_statement,
    insert_statement, reconcile,
};

#[cfg(feature = "serde")]
pub use gtfs_core::CatalogDefinition;

#[cfg(feature = "data")]
pub use gtfs_data::{
    ArchiveFeed, CatalogOrigin, ConversionReport, ConvertError, DirectoryFeed, FeedSource,
    HttpReferenceSource, ReferenceLayout, ReferenceSource, TableReport, convert_feed,
    export_definition, export_room_entities, load_catalog, load_definition, open_feed,
    run_conversion,
};
