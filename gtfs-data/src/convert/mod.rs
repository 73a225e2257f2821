//! Conversion driver: catalog, feed and SQLite sink sequenced as one run.
//!
//! A run moves through `Init -> SchemaLoaded -> (reconcile, create, insert)
//! per table -> Committed`, or to `Aborted` on the first failure. Aborting
//! drops the connection and deletes the output database, so a failed run
//! never leaves a partially loaded file behind.
#![forbid(unsafe_code)]

mod error;
mod report;

pub use error::{ConvertError, error_chain};
pub use report::{ConversionReport, TableReport};

use camino::Utf8Path;
use gtfs_core::{SchemaCatalog, reconcile};
use gtfs_fs::remove_file_if_exists;
use log::{debug, error, info, warn};

use crate::definition::load_definition;
use crate::feed::{FeedSource, open_feed};
use crate::reference::{ReferenceLayout, ReferenceSource, load_reference_catalog};
use crate::store::SqliteStore;

/// Where the schema catalog of a run comes from.
#[derive(Clone, Copy)]
pub enum CatalogOrigin<'a> {
    /// Scrape the reference page.
    Reference {
        /// Page source.
        source: &'a dyn ReferenceSource,
        /// Positional layout of the page.
        layout: &'a ReferenceLayout,
    },
    /// Read a previously exported definition file.
    Definition(&'a Utf8Path),
}

impl std::fmt::Debug for CatalogOrigin<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference { source, layout } => f
                .debug_struct("Reference")
                .field("location", &source.location())
                .field("layout", layout)
                .finish(),
            Self::Definition(path) => f.debug_tuple("Definition").field(path).finish(),
        }
    }
}

/// Obtain the schema catalog for a run.
///
/// # Errors
/// Returns [`ConvertError::SchemaLoad`] when the reference page cannot be
/// loaded and [`ConvertError::Configuration`] when the definition file is
/// invalid.
pub async fn load_catalog(origin: CatalogOrigin<'_>) -> Result<SchemaCatalog, ConvertError> {
    match origin {
        CatalogOrigin::Reference { source, layout } => {
            Ok(load_reference_catalog(source, layout).await?)
        }
        CatalogOrigin::Definition(path) => Ok(load_definition(path)?),
    }
}

/// Load every table of `feed` into a new SQLite database at `output`.
///
/// Tables are processed in the order the feed enumerates them. Each table is
/// looked up in `catalog`, reconciled to its columns, created and filled
/// inside a single transaction that commits only after the last table. Any
/// existing file at `output` is replaced.
///
/// # Errors
/// Returns the first [`ConvertError`] raised. The output database is
/// removed before returning.
///
/// # Examples
/// ```
/// use camino::Utf8PathBuf;
/// use gtfs_core::{ColumnSpec, NoPrimaryKeys, SchemaCatalog, TableSpec};
/// use gtfs_data::convert::convert_feed;
/// use gtfs_data::feed::DirectoryFeed;
///
/// let temp = tempfile::tempdir()?;
/// let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 path");
/// std::fs::create_dir(root.join("feed"))?;
/// std::fs::write(root.join("feed/agency.txt"), "agency_name,agency_url\nMetro,https://metro.example\n")?;
///
/// let specs = vec![TableSpec {
///     name: "agency".into(),
///     columns: vec![ColumnSpec::new("agency_name", "Text", "Required")],
/// }];
/// let catalog = SchemaCatalog::from_specs("gtfs", &specs, &NoPrimaryKeys)?;
/// let mut feed = DirectoryFeed::open(&root.join("feed"))?;
/// let report = convert_feed(&catalog, &mut feed, &root.join("feed.sqlite"))?;
/// assert_eq!(report.total_rows(), 1);
/// assert_eq!(report.tables()[0].dropped, ["agency_url"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert_feed(
    catalog: &SchemaCatalog,
    feed: &mut dyn FeedSource,
    output: &Utf8Path,
) -> Result<ConversionReport, ConvertError> {
    let outcome = SqliteStore::create(output)
        .map_err(ConvertError::from)
        .and_then(|mut store| load_tables(catalog, feed, &mut store));
    match outcome {
        Ok(tables) => {
            let report = ConversionReport::new(output.to_path_buf(), tables);
            info!(
                "committed {} tables ({} rows) to {output}",
                report.tables().len(),
                report.total_rows()
            );
            Ok(report)
        }
        Err(err) => {
            error!("conversion into {output} aborted: {}", error_chain(&err));
            discard_output(output);
            Err(err)
        }
    }
}

/// Load the catalog from `origin`, open the feed at `feed_path` and convert
/// it into `output`.
///
/// # Errors
/// Returns the first [`ConvertError`] raised. Schema and feed failures occur
/// before `output` is touched; later failures remove it.
pub async fn run_conversion(
    origin: CatalogOrigin<'_>,
    feed_path: &Utf8Path,
    output: &Utf8Path,
) -> Result<(SchemaCatalog, ConversionReport), ConvertError> {
    let catalog = load_catalog(origin).await?;
    let mut feed = open_feed(feed_path)?;
    let report = convert_feed(&catalog, feed.as_mut(), output)?;
    Ok((catalog, report))
}

fn load_tables(
    catalog: &SchemaCatalog,
    feed: &mut dyn FeedSource,
    store: &mut SqliteStore,
) -> Result<Vec<TableReport>, ConvertError> {
    let transaction = store.transaction()?;
    let mut tables = Vec::new();
    for name in feed.table_names() {
        let table = catalog.require_table(&name)?;
        let raw = feed.read_table(&name)?;
        let reconciled = reconcile(table, &raw);
        let rows = transaction.write_table(table, reconciled.rows())?;
        info!("loaded {rows} rows into {name}");
        tables.push(TableReport {
            table: name,
            rows,
            dropped: reconciled.dropped().to_vec(),
            filled: reconciled.filled().to_vec(),
        });
    }
    transaction.commit()?;
    Ok(tables)
}

fn discard_output(output: &Utf8Path) {
    match remove_file_if_exists(output) {
        Ok(true) => debug!("removed partial database {output}"),
        Ok(false) => {}
        Err(err) => warn!("failed to remove partial database {output}: {err}"),
    }
}
