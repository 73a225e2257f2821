//! Errors surfaced by a conversion run.

use std::error::Error as StdError;

use gtfs_core::SchemaMismatch;
use thiserror::Error;

use crate::definition::DefinitionError;
use crate::feed::FeedError;
use crate::reference::ReferenceError;
use crate::store::StoreError;

/// Fatal conversion failures. None is retried; any of them aborts the run
/// and leaves no output database behind.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The reference schema could not be fetched or parsed.
    #[error("failed to load the reference schema")]
    SchemaLoad(#[from] ReferenceError),
    /// The persisted definition is unreadable or inconsistent.
    #[error("invalid schema configuration")]
    Configuration(#[from] DefinitionError),
    /// A feed table has no catalog entry.
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),
    /// A feed table could not be read.
    #[error("failed to read feed")]
    Feed(#[from] FeedError),
    /// SQLite rejected a statement or row.
    #[error("failed to write database")]
    Storage(#[from] StoreError),
}

/// Render `error` and each of its sources, separated by `: `.
///
/// Variant messages carry only their own context, so this is how a caller
/// reports the failing table together with the SQLite or I/O cause.
#[must_use]
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(error), |&current| current.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
