use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8;
use gtfs_core::RawTable;
use gtfs_fs::open_utf8_file;
use zip::ZipArchive;

use super::directory::table_name;
use super::{FeedError, FeedSource, read_csv_table};

/// Feed stored as a zip archive.
///
/// Every file entry at the archive root is a table named after its file
/// stem; entries in sub-directories are ignored. Tables are enumerated in
/// archive order.
pub struct ArchiveFeed {
    path: Utf8PathBuf,
    archive: ZipArchive<fs_utf8::File>,
    entries: Vec<(String, usize)>,
}

impl std::fmt::Debug for ArchiveFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveFeed")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl ArchiveFeed {
    /// Open the archive at `path` and index its root entries.
    ///
    /// # Errors
    /// Returns [`FeedError::Io`] when the file cannot be opened and
    /// [`FeedError::Archive`] when it is not a readable zip archive.
    pub fn open(path: &Utf8Path) -> Result<Self, FeedError> {
        let file = open_utf8_file(path).map_err(|source| FeedError::Io {
            operation: "open feed archive",
            path: path.to_path_buf(),
            source,
        })?;
        let archive = ZipArchive::new(file).map_err(|source| FeedError::Archive {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = (0..archive.len())
            .filter_map(|index| {
                let entry = archive.name_for_index(index)?;
                if entry.contains('/') {
                    return None;
                }
                Some((table_name(entry), index))
            })
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            archive,
            entries,
        })
    }
}

impl FeedSource for ArchiveFeed {
    fn location(&self) -> &Utf8Path {
        &self.path
    }

    fn table_names(&self) -> Vec<String> {
        self.entries.iter().map(|(table, _)| table.clone()).collect()
    }

    fn read_table(&mut self, name: &str) -> Result<RawTable, FeedError> {
        let index = self
            .entries
            .iter()
            .find(|(table, _)| table == name)
            .map(|&(_, index)| index)
            .ok_or_else(|| FeedError::UnknownTable {
                table: name.to_owned(),
            })?;
        let entry = self
            .archive
            .by_index(index)
            .map_err(|source| FeedError::Archive {
                path: self.path.clone(),
                source,
            })?;
        read_csv_table(name, entry)
    }
}
