//! Data access and conversion logic for GTFS feeds.
//!
//! Responsibilities:
//! - Load the schema catalog from the GTFS reference page or a persisted
//!   definition file.
//! - Read feed tables from a directory or a zip archive.
//! - Write reconciled tables into a fresh SQLite database.
//! - Generate Android Room entity sources for a catalog.
//!
//! Boundaries:
//! - Do not encode schema rules (live in `gtfs-core`).
//! - Only the reference fetch is async; SQLite and file access stay
//!   blocking.
//!
//! Invariants:
//! - A failed conversion never leaves an output database behind.
//! - No global mutable state.

pub mod convert;
pub mod definition;
pub mod feed;
pub mod reference;
pub mod room;
pub mod store;

pub use convert::{
    CatalogOrigin, ConversionReport, ConvertError, TableReport, convert_feed, error_chain,
    load_catalog, run_conversion,
};
pub use definition::{DefinitionError, export_definition, load_definition};
pub use feed::{ArchiveFeed, DirectoryFeed, FeedError, FeedSource, open_feed};
pub use reference::{
    HttpReferenceSource, ReferenceError, ReferenceLayout, ReferenceSource, TransportError,
    load_reference_catalog,
};
pub use room::{RoomExport, RoomExportError, export_room_entities};
pub use store::{SqliteStore, StoreError, StoreTransaction};
