//! Reshaping raw feed tables into the exact column set of a catalog table.
//!
//! # Substring matching
//!
//! The drop and fill passes compare names by *containment*, not equality:
//! a raw column survives when its name occurs inside some schema column name,
//! and a schema column skips null-filling when its name occurs inside some
//! surviving raw column name. Overlapping names therefore interact: a raw
//! `id` column survives against a schema holding `route_id`, and a schema
//! `id` column is treated as covered by a raw `route_id`. The final assembly
//! only takes values from a surviving raw column whose name equals the schema
//! column, so such near-matches end up null; [`Reconciliation`] reports the
//! pass decisions so the discrepancy stays visible.

use log::debug;

use crate::alias::normalise_header;
use crate::catalog::TableDefinition;

/// A nullable raw cell. Empty CSV fields are read as `None`.
pub type Cell = Option<String>;

/// A raw table read from the feed: header plus rows aligned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Target table name (the input file's base name).
    pub name: String,
    /// Column names in file order, before aliasing.
    pub header: Vec<String>,
    /// Data rows; cell `i` belongs to `header[i]`.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }
}

/// Rows reshaped to a catalog table's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    dropped: Vec<String>,
    filled: Vec<String>,
}

impl Reconciliation {
    /// Output column names; always the table's columns in definition order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Output rows aligned to [`Reconciliation::columns`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Consume the reconciliation, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    /// Raw (aliased) column names removed by the drop pass.
    #[must_use]
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Schema columns synthesised as nulls by the fill pass.
    #[must_use]
    pub fn filled(&self) -> &[String] {
        &self.filled
    }
}

/// Reshape `raw` into the column set and order of `table`.
///
/// 1. Raw header names pass through the `stop_id` alias.
/// 2. Drop: a raw column survives only if its name is contained in at least
///    one schema column name.
/// 3. Fill: a schema column whose name is not contained in any surviving raw
///    name becomes a column of nulls.
/// 4. Reorder: output follows `table.columns()`; each column takes the
///    surviving raw column of the same name, or nulls.
///
/// The output always has exactly the table's columns, in order, and as many
/// rows as `raw`. Cells missing from short rows are read as null. See the
/// module docs for the consequences of substring matching.
///
/// # Examples
/// ```
/// use gtfs_core::{ColumnDefinition, ColumnType, NoPrimaryKeys, RawTable, TableDefinition, reconcile};
///
/// let table = TableDefinition::build(
///     "trips",
///     vec![
///         ColumnDefinition::new("route_id", ColumnType::Text, false),
///         ColumnDefinition::new("trip_id", ColumnType::Text, false),
///     ],
///     &NoPrimaryKeys,
/// )?;
/// let raw = RawTable::new(
///     "trips",
///     vec!["trip_id".into(), "junk".into()],
///     vec![vec![Some("t1".into()), Some("x".into())]],
/// );
/// let reconciled = reconcile(&table, &raw);
/// assert_eq!(reconciled.columns(), ["route_id", "trip_id"]);
/// assert_eq!(reconciled.rows(), [vec![None, Some("t1".to_owned())]]);
/// # Ok::<(), gtfs_core::CatalogError>(())
/// ```
#[must_use]
pub fn reconcile(table: &TableDefinition, raw: &RawTable) -> Reconciliation {
    let header = normalise_header(&raw.header);

    let (surviving, rejected): (Vec<(usize, &String)>, Vec<(usize, &String)>) = header
        .iter()
        .enumerate()
        .partition(|(_, raw_name)| {
            table
                .column_names()
                .any(|schema_name| schema_name.contains(raw_name.as_str()))
        });

    let filled: Vec<String> = table
        .column_names()
        .filter(|schema_name| {
            !surviving
                .iter()
                .any(|(_, raw_name)| raw_name.contains(*schema_name))
        })
        .map(str::to_owned)
        .collect();

    let sources: Vec<Option<usize>> = table
        .column_names()
        .map(|schema_name| {
            surviving
                .iter()
                .find(|(_, raw_name)| raw_name.as_str() == schema_name)
                .map(|&(index, _)| index)
        })
        .collect();

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            sources
                .iter()
                .map(|&source| source.and_then(|index| row.get(index).cloned().flatten()))
                .collect()
        })
        .collect();

    let dropped: Vec<String> = rejected.into_iter().map(|(_, name)| name.clone()).collect();
    debug!(
        "reconciled {}: {} rows, dropped {:?}, filled {:?}",
        table.name(),
        raw.rows.len(),
        dropped,
        filled
    );

    Reconciliation {
        columns: table.column_names().map(str::to_owned).collect(),
        rows,
        dropped,
        filled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnDefinition, ColumnType};
    use crate::keys::NoPrimaryKeys;
    use rstest::{fixture, rstest};

    fn cell(value: &str) -> Cell {
        Some(value.to_owned())
    }

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|&name| name.to_owned()).collect()
    }

    fn table(name: &str, columns: &[&str]) -> TableDefinition {
        let definitions = columns
            .iter()
            .map(|&column| ColumnDefinition::new(column, ColumnType::Text, true))
            .collect();
        TableDefinition::build(name, definitions, &NoPrimaryKeys).expect("build table")
    }

    #[fixture]
    fn trips() -> TableDefinition {
        TableDefinition::build(
            "trips",
            vec![
                ColumnDefinition::new("route_id", ColumnType::Integer, false),
                ColumnDefinition::new("service_id", ColumnType::Real, true),
                ColumnDefinition::new("trip_id", ColumnType::Text, false),
            ],
            &NoPrimaryKeys,
        )
        .expect("build trips")
    }

    #[rstest]
    fn reshapes_trips_to_schema_order(trips: TableDefinition) {
        let raw = RawTable::new(
            "trips",
            header(&["trip_id", "route_id", "extra_junk"]),
            vec![
                vec![cell("t1"), cell("r1"), cell("j1")],
                vec![cell("t2"), cell("r2"), cell("j2")],
            ],
        );

        let reconciled = reconcile(&trips, &raw);

        assert_eq!(reconciled.columns(), ["route_id", "service_id", "trip_id"]);
        assert_eq!(
            reconciled.rows(),
            [
                vec![cell("r1"), None, cell("t1")],
                vec![cell("r2"), None, cell("t2")],
            ]
        );
        assert_eq!(reconciled.dropped(), ["extra_junk"]);
        assert_eq!(reconciled.filled(), ["service_id"]);
    }

    #[rstest]
    #[case(&[])]
    #[case(&["unrelated"])]
    #[case(&["trip_id", "trip_id"])]
    #[case(&["service_id", "route_id", "trip_id", "shape_id"])]
    fn output_always_matches_schema_columns(trips: TableDefinition, #[case] names: &[&str]) {
        for row_count in [0_usize, 1, 3] {
            let rows = vec![vec![cell("v"); names.len()]; row_count];
            let raw = RawTable::new("trips", header(names), rows);

            let reconciled = reconcile(&trips, &raw);

            assert_eq!(reconciled.columns(), ["route_id", "service_id", "trip_id"]);
            assert_eq!(reconciled.rows().len(), row_count);
            assert!(reconciled.rows().iter().all(|row| row.len() == 3));
        }
    }

    #[rstest]
    fn unmatched_schema_columns_are_null(trips: TableDefinition) {
        let raw = RawTable::new(
            "trips",
            header(&["route_id"]),
            vec![vec![cell("r1")], vec![cell("r2")]],
        );

        let reconciled = reconcile(&trips, &raw);

        for row in reconciled.rows() {
            assert_eq!(row.get(1), Some(&None));
            assert_eq!(row.get(2), Some(&None));
        }
        assert_eq!(reconciled.filled(), ["service_id", "trip_id"]);
    }

    #[rstest]
    fn stop_identifiers_follow_the_alias() {
        let stops = table("stops", &["rowid", "stop_name"]);
        let raw = RawTable::new(
            "stops",
            header(&["stop_id", "stop_name"]),
            vec![vec![cell("S1"), cell("Central")]],
        );

        let reconciled = reconcile(&stops, &raw);

        assert_eq!(reconciled.rows(), [vec![cell("S1"), cell("Central")]]);
        assert!(reconciled.dropped().is_empty());
        assert!(reconciled.filled().is_empty());
    }

    #[rstest]
    fn substring_names_survive_the_drop_pass_but_stay_unbound() {
        let transfers = table("transfers", &["from_stop_id", "to_stop_id"]);
        let raw = RawTable::new(
            "transfers",
            header(&["id", "from_stop_id"]),
            vec![vec![cell("X"), cell("S2")]],
        );

        let reconciled = reconcile(&transfers, &raw);

        assert!(reconciled.dropped().is_empty());
        assert_eq!(reconciled.filled(), ["to_stop_id"]);
        assert_eq!(reconciled.rows(), [vec![cell("S2"), None]]);
    }

    #[rstest]
    fn aliased_stop_ids_drop_from_tables_without_rowid() {
        let transfers = table("transfers", &["from_stop_id", "to_stop_id"]);
        let raw = RawTable::new(
            "transfers",
            header(&["stop_id", "to_stop_id"]),
            vec![vec![cell("S1"), cell("S3")]],
        );

        let reconciled = reconcile(&transfers, &raw);

        assert_eq!(reconciled.dropped(), ["rowid"]);
        assert_eq!(reconciled.rows(), [vec![None, cell("S3")]]);
    }

    #[rstest]
    fn containing_raw_names_suppress_the_fill_pass() {
        let overlapping = table("overlap", &["id", "route_id"]);
        let raw = RawTable::new(
            "overlap",
            header(&["route_id"]),
            vec![vec![cell("r1")]],
        );

        let reconciled = reconcile(&overlapping, &raw);

        // `id` is contained in `route_id`, so the fill pass skips it, yet no
        // raw column is named `id` and the value stays null.
        assert!(reconciled.filled().is_empty());
        assert_eq!(reconciled.rows(), [vec![None, cell("r1")]]);
    }

    #[rstest]
    fn short_rows_read_as_null(trips: TableDefinition) {
        let raw = RawTable::new(
            "trips",
            header(&["route_id", "service_id", "trip_id"]),
            vec![vec![cell("r1")]],
        );

        let reconciled = reconcile(&trips, &raw);

        assert_eq!(reconciled.into_rows(), vec![vec![cell("r1"), None, None]]);
    }
}
