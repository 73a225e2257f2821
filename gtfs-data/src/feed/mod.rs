//! Feed row sources: one CSV file per table, loose or zipped.
#![forbid(unsafe_code)]

mod archive;
mod decode;
mod directory;
mod error;

pub use archive::ArchiveFeed;
pub use decode::read_csv_table;
pub use directory::DirectoryFeed;
pub use error::FeedError;

use std::fmt;

use camino::Utf8Path;
use gtfs_core::RawTable;
use gtfs_fs::{dir_is_dir, file_is_file};

/// Enumerates and decodes the tables of a feed.
pub trait FeedSource: fmt::Debug {
    /// Where the feed was opened from.
    fn location(&self) -> &Utf8Path;
    /// Table names in the order the feed enumerates them.
    fn table_names(&self) -> Vec<String>;
    /// Decode the named table.
    ///
    /// # Errors
    /// Returns [`FeedError::UnknownTable`] for names the feed does not list,
    /// or a decoding error for malformed files.
    fn read_table(&mut self, name: &str) -> Result<RawTable, FeedError>;
}

/// Open `path` as a [`DirectoryFeed`] when it is a directory, otherwise as
/// an [`ArchiveFeed`].
///
/// # Errors
/// Returns [`FeedError::NotFound`] when nothing exists at `path`, or the
/// errors of the selected feed's `open`.
pub fn open_feed(path: &Utf8Path) -> Result<Box<dyn FeedSource>, FeedError> {
    let io_error = |source| FeedError::Io {
        operation: "inspect feed path",
        path: path.to_path_buf(),
        source,
    };
    if dir_is_dir(path).map_err(io_error)? {
        return Ok(Box::new(DirectoryFeed::open(path)?));
    }
    if file_is_file(path).map_err(io_error)? {
        return Ok(Box::new(ArchiveFeed::open(path)?));
    }
    Err(FeedError::NotFound {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests;
