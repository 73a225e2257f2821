//! Loading and exporting persisted catalog definitions.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use gtfs_core::{CatalogDefinition, CatalogError, SchemaCatalog};
use gtfs_fs::{ensure_parent_dir, open_dir_and_file, open_utf8_file};
use log::info;
use thiserror::Error;

/// Errors raised while reading or writing a definition file.
///
/// Reading failures are configuration errors for a conversion run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// The file could not be read.
    #[error("failed to read definition {path}")]
    Read {
        /// Definition path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid definition document.
    #[error("failed to parse definition {path}")]
    Parse {
        /// Definition path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The document's keys disagree with its columns.
    #[error("definition {path} is inconsistent")]
    Catalog {
        /// Definition path.
        path: Utf8PathBuf,
        /// Catalog assembly failure.
        #[source]
        source: CatalogError,
    },
    /// The catalog could not be encoded.
    #[error("failed to encode definition for {path}")]
    Encode {
        /// Target path.
        path: Utf8PathBuf,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The file could not be written.
    #[error("failed to write definition {path}")]
    Write {
        /// Target path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Load the catalog stored at `path`.
///
/// # Errors
/// Returns [`DefinitionError`] when the file is unreadable, malformed, or
/// lists primary keys missing from their tables.
pub fn load_definition(path: &Utf8Path) -> Result<SchemaCatalog, DefinitionError> {
    let read_error = |source| DefinitionError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut text = String::new();
    open_utf8_file(path)
        .map_err(read_error)?
        .read_to_string(&mut text)
        .map_err(read_error)?;
    let catalog = CatalogDefinition::from_json(&text)
        .map_err(|source| DefinitionError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .into_catalog()
        .map_err(|source| DefinitionError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
    info!("loaded {} tables from definition {path}", catalog.len());
    Ok(catalog)
}

/// Write `catalog` to `path` as pretty-printed JSON, replacing any file
/// already there.
///
/// # Errors
/// Returns [`DefinitionError::Write`] when the file or its parent directory
/// cannot be written.
pub fn export_definition(catalog: &SchemaCatalog, path: &Utf8Path) -> Result<(), DefinitionError> {
    let write_error = |source| DefinitionError::Write {
        path: path.to_path_buf(),
        source,
    };
    let json = CatalogDefinition::from_catalog(catalog)
        .to_json_pretty()
        .map_err(|source| DefinitionError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    ensure_parent_dir(path).map_err(write_error)?;
    let (dir, file_name) = open_dir_and_file(path).map_err(write_error)?;
    dir.write(file_name.as_str(), json).map_err(write_error)?;
    info!("exported {} tables to definition {path}", catalog.len());
    Ok(())
}
