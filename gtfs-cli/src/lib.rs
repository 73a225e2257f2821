//! Command-line interface for converting GTFS feeds into SQLite.
#![forbid(unsafe_code)]

mod convert;
mod error;
mod export;

pub use error::CliError;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use gtfs_data::convert::CatalogOrigin;
use gtfs_data::reference::{HttpReferenceSource, ReferenceLayout};
use log::debug;
use tokio::runtime::{Builder, Runtime};
use tracing_subscriber::EnvFilter;

use crate::convert::ConvertArgs;
use crate::export::ExportArgs;

const ARG_FEED: &str = "feed";
const ARG_OUTPUT: &str = "output";
const ARG_REFERENCE: &str = "reference";
const ARG_ENDPOINT: &str = "endpoint";
const ARG_USER_AGENT: &str = "user-agent";
const ARG_ROOM_ENTITIES: &str = "room-entities";
const ARG_EXPORT_DEFINITION: &str = "export-definition";
const ENV_CONVERT_FEED: &str = "GTFS_SQLITE_CMDS_CONVERT_FEED";
const ENV_CONVERT_OUTPUT: &str = "GTFS_SQLITE_CMDS_CONVERT_OUTPUT";
const ENV_EXPORT_OUTPUT: &str = "GTFS_SQLITE_CMDS_EXPORT_REFERENCE_OUTPUT";

/// Run the gtfs-sqlite CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid or the selected command
/// fails.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    init_logging();
    match cli.command {
        Command::Convert(args) => {
            let config = args.into_config()?;
            config.validate_sources()?;
            convert::run_convert(&config)?;
        }
        Command::ExportReference(args) => {
            let config = args.into_config()?;
            config.validate_sources()?;
            export::run_export(&config)?;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = installed {
        debug!("logging already initialised: {err}");
    }
}

fn build_runtime() -> Result<Runtime, CliError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

#[derive(Debug, Parser)]
#[command(
    name = "gtfs-sqlite",
    about = "Convert GTFS feeds into SQLite databases",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a feed into a fresh SQLite database.
    Convert(ConvertArgs),
    /// Write the schema catalog as a definition file without converting.
    ExportReference(ExportArgs),
}

/// Where a command obtains its schema catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SchemaSource {
    /// Persisted definition file.
    Definition(Utf8PathBuf),
    /// Reference page scraped over HTTP.
    Reference { endpoint: String, user_agent: String },
}

impl SchemaSource {
    fn from_options(
        reference: Option<Utf8PathBuf>,
        endpoint: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        reference.map_or_else(
            || Self::Reference {
                endpoint: endpoint
                    .unwrap_or_else(|| gtfs_data::reference::DEFAULT_REFERENCE_URL.to_owned()),
                user_agent: user_agent
                    .unwrap_or_else(|| gtfs_data::reference::DEFAULT_USER_AGENT.to_owned()),
            },
            Self::Definition,
        )
    }

    /// Build the catalog origin and hand it to `run`.
    fn with_origin<T>(&self, run: impl FnOnce(CatalogOrigin<'_>) -> T) -> Result<T, CliError> {
        match self {
            Self::Definition(path) => Ok(run(CatalogOrigin::Definition(path))),
            Self::Reference {
                endpoint,
                user_agent,
            } => {
                let source = HttpReferenceSource::new(endpoint.as_str())?
                    .with_user_agent(user_agent.as_str());
                let layout = ReferenceLayout::default();
                Ok(run(CatalogOrigin::Reference {
                    source: &source,
                    layout: &layout,
                }))
            }
        }
    }

    fn validate(&self) -> Result<(), CliError> {
        match self {
            Self::Definition(path) => require_file(path, ARG_REFERENCE),
            Self::Reference { .. } => Ok(()),
        }
    }
}

fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match gtfs_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if gtfs_fs::dir_is_dir(path).unwrap_or(false) => Err(CliError::SourcePathKind {
            field,
            path: path.to_path_buf(),
            expected: "a file",
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn require_file_or_dir(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    let inspect_error = |source| CliError::InspectSourcePath {
        field,
        path: path.to_path_buf(),
        source,
    };
    if gtfs_fs::file_is_file(path).map_err(inspect_error)?
        || gtfs_fs::dir_is_dir(path).map_err(inspect_error)?
    {
        Ok(())
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests;
