//! Schema catalog sourced from the published GTFS reference page.
#![forbid(unsafe_code)]

mod error;
mod parse;
mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::{ReferenceError, TransportError};
pub use parse::{ReferenceLayout, parse_reference_page};
pub use source::{DEFAULT_REFERENCE_URL, DEFAULT_USER_AGENT, HttpReferenceSource, ReferenceSource};

use gtfs_core::{SchemaCatalog, StaticPrimaryKeys};
use log::info;

/// Catalog name given to catalogs built from the reference page.
pub const REFERENCE_CATALOG_NAME: &str = "gtfs";

/// Fetch the reference page and assemble the catalog it describes.
///
/// Primary keys come from the curated [`StaticPrimaryKeys::gtfs`] table.
///
/// # Errors
/// Returns [`ReferenceError::Fetch`] when the page cannot be read, the
/// parsing errors of [`parse_reference_page`], or
/// [`ReferenceError::Catalog`] when a curated key is missing from its table.
///
/// # Examples
/// ```no_run
/// use gtfs_data::reference::{
///     DEFAULT_REFERENCE_URL, HttpReferenceSource, ReferenceLayout, load_reference_catalog,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpReferenceSource::new(DEFAULT_REFERENCE_URL)?;
/// let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
/// let catalog = runtime.block_on(load_reference_catalog(&source, &ReferenceLayout::default()))?;
/// println!("{} tables", catalog.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_reference_catalog<S: ReferenceSource + ?Sized>(
    source: &S,
    layout: &ReferenceLayout,
) -> Result<SchemaCatalog, ReferenceError> {
    let html = source
        .fetch_page()
        .await
        .map_err(|err| ReferenceError::Fetch { source: err })?;
    let specs = parse_reference_page(&html, layout)?;
    let catalog =
        SchemaCatalog::from_specs(REFERENCE_CATALOG_NAME, &specs, &StaticPrimaryKeys::gtfs())
            .map_err(|err| ReferenceError::Catalog { source: err })?;
    info!(
        "loaded {} reference tables from {}",
        catalog.len(),
        source.location()
    );
    Ok(catalog)
}
