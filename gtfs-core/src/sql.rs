//! DDL and DML text for catalog tables.
//!
//! Both renderers are pure functions of a [`TableDefinition`]; identical
//! definitions always yield byte-identical statements.

use crate::catalog::TableDefinition;
use crate::reconcile::Cell;

/// Render the `CREATE TABLE` statement for `table`.
///
/// Column clauses follow the table's column order. A table-level
/// `PRIMARY KEY(...)` clause is appended whenever the table has keys, for
/// single and composite keys alike; no inline key markers are emitted.
///
/// # Examples
/// ```
/// use gtfs_core::{ColumnDefinition, ColumnType, NoPrimaryKeys, TableDefinition, create_table_statement};
///
/// let table = TableDefinition::build(
///     "trips",
///     vec![
///         ColumnDefinition::new("route_id", ColumnType::Integer, false),
///         ColumnDefinition::new("service_id", ColumnType::Real, true),
///     ],
///     &NoPrimaryKeys,
/// )?;
/// assert_eq!(
///     create_table_statement(&table),
///     "CREATE TABLE trips (`route_id` INTEGER NOT NULL, `service_id` REAL);"
/// );
/// # Ok::<(), gtfs_core::CatalogError>(())
/// ```
#[must_use]
pub fn create_table_statement(table: &TableDefinition) -> String {
    let mut clauses: Vec<String> = table
        .columns()
        .iter()
        .map(|column| {
            let mut clause = format!("`{}` {}", column.name(), column.column_type());
            if !column.is_nullable() {
                clause.push_str(" NOT NULL");
            }
            clause
        })
        .collect();
    if !table.primary_keys().is_empty() {
        clauses.push(format!("PRIMARY KEY({})", table.primary_keys().join(", ")));
    }
    format!("CREATE TABLE {} ({});", table.name(), clauses.join(", "))
}

/// Render the positional insert template for `table`.
///
/// The column list follows the table's column order and carries exactly one
/// `?` placeholder per column.
#[must_use]
pub fn insert_statement(table: &TableDefinition) -> String {
    let columns: Vec<String> = table
        .column_names()
        .map(|name| format!("`{name}`"))
        .collect();
    let placeholders = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {}({}) VALUES ({})",
        table.name(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Positional bind tuples for reconciled rows.
///
/// Rows produced by [`reconcile`](crate::reconcile) are already in column
/// order, so each tuple is borrowed as-is.
pub fn bind_rows(rows: &[Vec<Cell>]) -> impl ExactSizeIterator<Item = &[Cell]> {
    rows.iter().map(Vec::as_slice)
}
