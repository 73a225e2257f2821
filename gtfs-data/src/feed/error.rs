//! Errors raised while reading feed files.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while enumerating or decoding feed tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedError {
    /// The feed path is neither a directory nor a regular file.
    #[error("feed {path} does not exist")]
    NotFound {
        /// Path supplied for the feed.
        path: Utf8PathBuf,
    },
    /// Filesystem access failed.
    #[error("failed to {operation} {path}")]
    Io {
        /// What was being attempted.
        operation: &'static str,
        /// Path involved.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The zip archive could not be read.
    #[error("failed to read feed archive {path}")]
    Archive {
        /// Archive path.
        path: Utf8PathBuf,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },
    /// The feed has no table with this name.
    #[error("feed has no table `{table}`")]
    UnknownTable {
        /// Requested table.
        table: String,
    },
    /// The table file has no header row.
    #[error("table `{table}` has no header row")]
    MissingHeader {
        /// Table being decoded.
        table: String,
    },
    /// The table file is not valid CSV (including ragged rows).
    #[error("failed to decode table `{table}`")]
    Csv {
        /// Table being decoded.
        table: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}
