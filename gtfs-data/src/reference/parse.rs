//! Extraction of table specs from the reference page HTML.

use gtfs_core::{ColumnSpec, TableSpec};
use log::debug;
use scraper::{ElementRef, Html, Selector};

use super::ReferenceError;

const HEADING_SELECTOR: &str = "h3[id]";
const TABLE_SELECTOR: &str = "table > tbody";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td";
const FILE_SUFFIX: &str = ".txt";

/// Positions of the page elements that do not describe feed files.
///
/// The reference page mixes file tables with term definitions and examples.
/// They are excluded by position: trailing headings, individual tables by
/// their original index, and trailing tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLayout {
    /// Headings dropped from the end of the page.
    pub trailing_headings: usize,
    /// Original table positions to drop.
    pub skipped_tables: Vec<usize>,
    /// Tables dropped from the end of the page.
    pub trailing_tables: usize,
}

impl Default for ReferenceLayout {
    fn default() -> Self {
        Self {
            trailing_headings: 2,
            skipped_tables: vec![0, 5],
            trailing_tables: 4,
        }
    }
}

impl ReferenceLayout {
    fn required_tables(&self) -> usize {
        let skipped = self
            .skipped_tables
            .iter()
            .max()
            .map_or(0, |&position| position.saturating_add(1));
        skipped.saturating_add(self.trailing_tables)
    }

    fn keep_headings<'a>(
        &self,
        headings: Vec<ElementRef<'a>>,
    ) -> Result<Vec<ElementRef<'a>>, ReferenceError> {
        let found = headings.len();
        let kept = found
            .checked_sub(self.trailing_headings)
            .ok_or(ReferenceError::Layout {
                what: "headings",
                expected: self.trailing_headings,
                found,
            })?;
        Ok(headings.into_iter().take(kept).collect())
    }

    fn keep_tables<'a>(
        &self,
        tables: Vec<ElementRef<'a>>,
    ) -> Result<Vec<ElementRef<'a>>, ReferenceError> {
        let found = tables.len();
        let expected = self.required_tables();
        if found < expected {
            return Err(ReferenceError::Layout {
                what: "tables",
                expected,
                found,
            });
        }
        let end = found - self.trailing_tables;
        Ok(tables
            .into_iter()
            .enumerate()
            .filter(|(position, _)| *position < end && !self.skipped_tables.contains(position))
            .map(|(_, table)| table)
            .collect())
    }
}

fn selector(text: &'static str) -> Result<Selector, ReferenceError> {
    Selector::parse(text).map_err(|err| ReferenceError::Selector {
        selector: text,
        message: err.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

fn table_name(heading: ElementRef<'_>) -> String {
    let text = element_text(heading);
    text.strip_suffix(FILE_SUFFIX)
        .map_or_else(|| text.clone(), str::to_owned)
}

/// Extract one [`TableSpec`] per feed file described by the page.
///
/// Headings (`h3[id]`) and tables (`table > tbody`) are collected in document
/// order, filtered through `layout`, and paired by position. Each table row
/// contributes its first three cells as the column name, type label and
/// requirement label. Surplus headings are ignored.
///
/// # Errors
/// - [`ReferenceError::Layout`] when the page is too small for `layout`.
/// - [`ReferenceError::MissingHeading`] when a table has no heading.
/// - [`ReferenceError::MalformedRow`] when a row has fewer than three cells.
///
/// # Examples
/// ```
/// use gtfs_data::reference::{ReferenceLayout, parse_reference_page};
///
/// let layout = ReferenceLayout {
///     trailing_headings: 0,
///     skipped_tables: Vec::new(),
///     trailing_tables: 0,
/// };
/// let html = r#"<h3 id="agency">agency.txt</h3>
///     <table><tbody><tr><td>agency_id</td><td>Unique ID</td><td>Conditionally Required</td></tr></tbody></table>"#;
/// let specs = parse_reference_page(html, &layout)?;
/// assert_eq!(specs[0].name, "agency");
/// assert_eq!(specs[0].columns[0].type_label, "Unique ID");
/// # Ok::<(), gtfs_data::reference::ReferenceError>(())
/// ```
pub fn parse_reference_page(
    html: &str,
    layout: &ReferenceLayout,
) -> Result<Vec<TableSpec>, ReferenceError> {
    let document = Html::parse_document(html);
    let headings = layout.keep_headings(document.select(&selector(HEADING_SELECTOR)?).collect())?;
    let tables = layout.keep_tables(document.select(&selector(TABLE_SELECTOR)?).collect())?;
    let rows = selector(ROW_SELECTOR)?;
    let cells = selector(CELL_SELECTOR)?;

    tables
        .into_iter()
        .enumerate()
        .map(|(index, table)| {
            let heading = headings
                .get(index)
                .copied()
                .ok_or(ReferenceError::MissingHeading { index })?;
            let name = table_name(heading);
            let columns = table
                .select(&rows)
                .enumerate()
                .map(|(row_index, row)| column_spec(&name, row_index, row, &cells))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("reference table {name}: {} columns", columns.len());
            Ok(TableSpec { name, columns })
        })
        .collect()
}

fn column_spec(
    table: &str,
    row_index: usize,
    row: ElementRef<'_>,
    cells: &Selector,
) -> Result<ColumnSpec, ReferenceError> {
    let texts: Vec<String> = row.select(cells).map(element_text).collect();
    match texts.as_slice() {
        [name, type_label, requirement, ..] => Ok(ColumnSpec::new(
            name.as_str(),
            type_label.as_str(),
            requirement.as_str(),
        )),
        _ => Err(ReferenceError::MalformedRow {
            table: table.to_owned(),
            row: row_index,
            cells: texts.len(),
        }),
    }
}
