//! `export-reference` command: write the schema catalog without converting.

use camino::Utf8PathBuf;
use clap::Parser;
use gtfs_data::convert::load_catalog;
use gtfs_data::definition::export_definition;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ENDPOINT, ARG_OUTPUT, ARG_REFERENCE, ARG_USER_AGENT, CliError, ENV_EXPORT_OUTPUT,
    SchemaSource, build_runtime,
};

/// CLI arguments for the `export-reference` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "export-reference",
    about = "Write the schema catalog to a definition file"
)]
#[ortho_config(prefix = "GTFS_SQLITE")]
pub(crate) struct ExportArgs {
    /// Definition file to write.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Stored definition to re-export instead of scraping the reference page.
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
}

impl ExportArgs {
    pub(crate) fn into_config(self) -> Result<ExportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExportConfig::try_from(merged)
    }
}

/// Resolved `export-reference` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportConfig {
    pub(crate) output: Utf8PathBuf,
    pub(crate) schema: SchemaSource,
}

impl ExportConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        self.schema.validate()
    }
}

impl TryFrom<ExportArgs> for ExportConfig {
    type Error = CliError;

    fn try_from(args: ExportArgs) -> Result<Self, Self::Error> {
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_EXPORT_OUTPUT,
        })?;
        Ok(Self {
            output,
            schema: SchemaSource::from_options(args.reference, args.endpoint, args.user_agent),
        })
    }
}

/// Load the configured catalog and write it to the output definition file.
pub(crate) fn run_export(config: &ExportConfig) -> Result<(), CliError> {
    let runtime = build_runtime()?;
    let catalog = config
        .schema
        .with_origin(|origin| runtime.block_on(load_catalog(origin)))??;
    export_definition(&catalog, &config.output)?;
    Ok(())
}
