//! Convert command implementation for the gtfs-sqlite CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use gtfs_data::convert::{ConversionReport, run_conversion};
use gtfs_data::definition::export_definition;
use gtfs_data::room::export_room_entities;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ENDPOINT, ARG_EXPORT_DEFINITION, ARG_FEED, ARG_OUTPUT, ARG_REFERENCE, ARG_ROOM_ENTITIES,
    ARG_USER_AGENT, CliError, ENV_CONVERT_FEED, ENV_CONVERT_OUTPUT, SchemaSource, build_runtime,
    require_file_or_dir,
};

/// CLI arguments for the `convert` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "convert",
    long_about = "Load every table of a GTFS feed into a new SQLite database. \
                 The schema comes from a stored definition file when \
                 --reference is given, otherwise from the published GTFS \
                 reference page.",
    about = "Convert a GTFS feed into SQLite"
)]
#[ortho_config(prefix = "GTFS_SQLITE")]
pub(crate) struct ConvertArgs {
    /// Feed to convert: a zip archive or a directory of `.txt` files.
    #[arg(long = ARG_FEED, value_name = "path")]
    #[serde(default)]
    pub(crate) feed: Option<Utf8PathBuf>,
    /// SQLite database to create; an existing file is replaced.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Stored definition file to use instead of the reference page.
    #[arg(long = ARG_REFERENCE, value_name = "path")]
    #[serde(default)]
    pub(crate) reference: Option<Utf8PathBuf>,
    /// Reference page URL.
    #[arg(long = ARG_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// User agent sent when fetching the reference page.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Directory receiving Android Room entity sources.
    #[arg(long = ARG_ROOM_ENTITIES, value_name = "dir")]
    #[serde(default)]
    pub(crate) room_entities: Option<Utf8PathBuf>,
    /// Also write the catalog used for the run to this definition file.
    #[arg(long = ARG_EXPORT_DEFINITION, value_name = "path")]
    #[serde(default)]
    pub(crate) export_definition: Option<Utf8PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn into_config(self) -> Result<ConvertConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ConvertConfig::try_from(merged)
    }
}

/// Resolved `convert` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConvertConfig {
    pub(crate) feed: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
    pub(crate) schema: SchemaSource,
    pub(crate) room_entities: Option<Utf8PathBuf>,
    pub(crate) export_definition: Option<Utf8PathBuf>,
}

impl ConvertConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file_or_dir(&self.feed, ARG_FEED)?;
        self.schema.validate()
    }
}

impl TryFrom<ConvertArgs> for ConvertConfig {
    type Error = CliError;

    fn try_from(args: ConvertArgs) -> Result<Self, Self::Error> {
        let feed = args.feed.ok_or(CliError::MissingArgument {
            field: ARG_FEED,
            env: ENV_CONVERT_FEED,
        })?;
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_CONVERT_OUTPUT,
        })?;
        Ok(Self {
            feed,
            output,
            schema: SchemaSource::from_options(args.reference, args.endpoint, args.user_agent),
            room_entities: args.room_entities,
            export_definition: args.export_definition,
        })
    }
}

/// Convert the configured feed, then write the optional artefacts derived
/// from its catalog.
pub(crate) fn run_convert(config: &ConvertConfig) -> Result<ConversionReport, CliError> {
    let runtime = build_runtime()?;
    let outcome = config.schema.with_origin(|origin| {
        runtime.block_on(run_conversion(origin, &config.feed, &config.output))
    })?;
    let (catalog, report) = outcome?;

    for table in report.tables() {
        info!(
            "{}: {} rows, dropped [{}], filled [{}]",
            table.table,
            table.rows,
            table.dropped.join(", "),
            table.filled.join(", ")
        );
    }
    if let Some(path) = &config.export_definition {
        export_definition(&catalog, path)?;
    }
    if let Some(dir) = &config.room_entities {
        export_room_entities(&catalog, dir)?;
    }
    Ok(report)
}
