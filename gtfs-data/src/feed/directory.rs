use camino::{Utf8Path, Utf8PathBuf};
use gtfs_core::RawTable;
use gtfs_fs::{list_files, open_utf8_file};

use super::{FeedError, FeedSource, read_csv_table};

/// Feed stored as loose files in a directory.
///
/// Every regular file directly inside the directory is a table named after
/// its file stem. Tables are enumerated in file-name order.
#[derive(Debug, Clone)]
pub struct DirectoryFeed {
    root: Utf8PathBuf,
    files: Vec<(String, String)>,
}

impl DirectoryFeed {
    /// Enumerate the files below `root`.
    ///
    /// # Errors
    /// Returns [`FeedError::Io`] when the directory cannot be listed.
    pub fn open(root: &Utf8Path) -> Result<Self, FeedError> {
        let names = list_files(root).map_err(|source| FeedError::Io {
            operation: "list feed directory",
            path: root.to_path_buf(),
            source,
        })?;
        let files = names
            .into_iter()
            .map(|file_name| (table_name(&file_name), file_name))
            .collect();
        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }
}

pub(super) fn table_name(file_name: &str) -> String {
    let path = Utf8Path::new(file_name);
    path.file_stem().unwrap_or(file_name).to_owned()
}

impl FeedSource for DirectoryFeed {
    fn location(&self) -> &Utf8Path {
        &self.root
    }

    fn table_names(&self) -> Vec<String> {
        self.files.iter().map(|(table, _)| table.clone()).collect()
    }

    fn read_table(&mut self, name: &str) -> Result<RawTable, FeedError> {
        let (_, file_name) = self
            .files
            .iter()
            .find(|(table, _)| table == name)
            .ok_or_else(|| FeedError::UnknownTable {
                table: name.to_owned(),
            })?;
        let path = self.root.join(file_name);
        let file = open_utf8_file(&path).map_err(|source| FeedError::Io {
            operation: "open feed file",
            path: path.clone(),
            source,
        })?;
        read_csv_table(name, file)
    }
}
