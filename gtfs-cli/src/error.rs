//! Error types emitted by the gtfs-sqlite CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.
//! Messages name only their own context; [`CliError::report`] renders the
//! full cause chain.

use std::sync::Arc;

use camino::Utf8PathBuf;
use gtfs_data::convert::{ConvertError, error_chain};
use gtfs_data::definition::DefinitionError;
use gtfs_data::reference::TransportError;
use gtfs_data::room::RoomExportError;
use thiserror::Error;

/// Errors emitted by the gtfs-sqlite CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Command-line flag name.
        field: &'static str,
        /// Environment variable carrying the option.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Command-line flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but has the wrong kind.
    #[error("{field} path {path:?} must be {expected}")]
    SourcePathKind {
        /// Command-line flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Accepted kinds, for the message.
        expected: &'static str,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}")]
    InspectSourcePath {
        /// Command-line flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The async runtime used for the reference fetch could not start.
    #[error("failed to start the async runtime")]
    Runtime(#[source] std::io::Error),
    /// The HTTP client for the reference page could not be built.
    #[error(transparent)]
    ReferenceClient(#[from] TransportError),
    /// The conversion run failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// Writing the catalog definition failed.
    #[error(transparent)]
    ExportDefinition(#[from] DefinitionError),
    /// Writing Room entity sources failed.
    #[error(transparent)]
    RoomExport(#[from] RoomExportError),
}

impl CliError {
    /// Render this error followed by every underlying cause.
    #[must_use]
    pub fn report(&self) -> String {
        error_chain(self)
    }
}
