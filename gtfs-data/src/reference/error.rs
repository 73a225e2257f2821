//! Error types produced while loading the reference schema.

use std::io;

use gtfs_core::CatalogError;
use thiserror::Error;

/// Errors raised while turning the reference page into a schema catalog.
///
/// Every variant is fatal: the conversion aborts before any table is touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReferenceError {
    /// The reference page could not be fetched.
    #[error("failed to fetch reference page")]
    Fetch {
        /// Transport failure.
        #[source]
        source: TransportError,
    },
    /// A built-in CSS selector failed to parse.
    #[error("invalid selector `{selector}`: {message}")]
    Selector {
        /// The selector text.
        selector: &'static str,
        /// Parser message.
        message: String,
    },
    /// The page has fewer headings or tables than the layout removes.
    #[error("reference page has {found} {what}, expected at least {expected}")]
    Layout {
        /// `"headings"` or `"tables"`.
        what: &'static str,
        /// Minimum count the layout needs.
        expected: usize,
        /// Count found on the page.
        found: usize,
    },
    /// A schema table has no heading to name it.
    #[error("reference table {index} has no matching heading")]
    MissingHeading {
        /// Position of the table after layout filtering.
        index: usize,
    },
    /// A table row lacks the name, type and requirement cells.
    #[error("row {row} of reference table `{table}` has {cells} cells, expected at least 3")]
    MalformedRow {
        /// Table being parsed.
        table: String,
        /// Zero-based row index.
        row: usize,
        /// Cell count found.
        cells: usize,
    },
    /// The extracted tables disagree with the curated primary keys.
    #[error("reference schema is inconsistent")]
    Catalog {
        /// Catalog assembly failure.
        #[source]
        source: CatalogError,
    },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The request failed before a status was received, or the body could not
    /// be read.
    #[error("network error contacting {url}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        #[source]
        source: io::Error,
    },
}
