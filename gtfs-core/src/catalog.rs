//! Immutable table catalog built once per conversion run.

use indexmap::IndexMap;
use log::warn;
use thiserror::Error;

use crate::alias::apply_alias;
use crate::column::{ColumnDefinition, ColumnSpec};
use crate::keys::PrimaryKeySource;

/// Errors raised while assembling catalog tables.
///
/// These indicate that the schema and the primary-key source disagree; the
/// conversion run treats them as configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A primary-key column named by the key source is not a table column.
    #[error("primary key column `{column}` is not defined on table `{table}`")]
    UnknownPrimaryKey {
        /// Table being assembled.
        table: String,
        /// Key column missing from the table.
        column: String,
    },
}

/// An input table name with no matching catalog entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("table `{table}` is not defined in the schema catalog")]
pub struct SchemaMismatch {
    /// Name of the missing table.
    pub table: String,
}

/// Reference-documentation labels for one table, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name without any file extension.
    pub name: String,
    /// Columns in the order the reference lists them.
    pub columns: Vec<ColumnSpec>,
}

/// A fully resolved table: ordered columns and primary keys.
///
/// Column order is fixed at construction; it drives both the `CREATE TABLE`
/// column order and positional binding of inserted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    name: String,
    columns: Vec<ColumnDefinition>,
    primary_keys: Vec<String>,
}

impl TableDefinition {
    /// Assemble a table from ordered columns and the keys `keys` supplies for
    /// `name`.
    ///
    /// Every key column is marked as a primary key and forced to `NOT NULL`.
    /// Key names pass through the alias rule so a source naming `stop_id`
    /// still resolves against the aliased column.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownPrimaryKey`] when a key column does not
    /// exist in `columns`.
    ///
    /// # Examples
    /// ```
    /// use gtfs_core::{ColumnDefinition, StaticPrimaryKeys, TableDefinition};
    ///
    /// let columns = vec![
    ///     ColumnDefinition::from_labels("route_id", "Unique ID", "Required"),
    ///     ColumnDefinition::from_labels("trip_id", "Unique ID", "Required"),
    /// ];
    /// let table = TableDefinition::build("trips", columns, &StaticPrimaryKeys::gtfs())?;
    /// assert_eq!(table.primary_keys(), ["trip_id"]);
    /// assert!(table.column("trip_id").is_some_and(|c| c.is_primary_key()));
    /// # Ok::<(), gtfs_core::CatalogError>(())
    /// ```
    pub fn build(
        name: &str,
        mut columns: Vec<ColumnDefinition>,
        keys: &dyn PrimaryKeySource,
    ) -> Result<Self, CatalogError> {
        let primary_keys: Vec<String> = keys
            .keys_for(name)
            .iter()
            .map(|key| apply_alias(key).to_owned())
            .collect();

        for key in &primary_keys {
            let column = columns
                .iter_mut()
                .find(|column| column.name() == key)
                .ok_or_else(|| CatalogError::UnknownPrimaryKey {
                    table: name.to_owned(),
                    column: key.clone(),
                })?;
            column.mark_primary_key();
        }

        Ok(Self {
            name: name.to_owned(),
            columns,
            primary_keys,
        })
    }

    /// Resolve a [`TableSpec`] and assemble it with [`TableDefinition::build`].
    ///
    /// # Errors
    /// Propagates [`CatalogError`] from [`TableDefinition::build`].
    pub fn from_spec(spec: &TableSpec, keys: &dyn PrimaryKeySource) -> Result<Self, CatalogError> {
        let columns = spec.columns.iter().map(ColumnSpec::to_definition).collect();
        Self::build(&spec.name, columns, keys)
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in definition order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Column names in definition order.
    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.columns.iter().map(ColumnDefinition::name)
    }

    /// Look up a column by its (aliased) name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Ordered primary-key column names, possibly empty.
    #[must_use]
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }
}

/// Named, read-only collection of table definitions.
///
/// Tables keep the order in which they were assembled (document order for
/// the reference page, file order for persisted definitions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCatalog {
    name: String,
    tables: IndexMap<String, TableDefinition>,
}

impl SchemaCatalog {
    /// Assemble a catalog from already built tables.
    ///
    /// A repeated table name replaces the earlier definition (last writer
    /// wins) while keeping the earlier position; a warning is logged.
    #[must_use]
    pub fn new(name: impl Into<String>, tables: impl IntoIterator<Item = TableDefinition>) -> Self {
        let catalog_name: String = name.into();
        let mut indexed = IndexMap::new();
        for table in tables {
            if let Some(previous) = indexed.insert(table.name().to_owned(), table) {
                warn!(
                    "catalog {catalog_name}: table `{}` defined more than once; keeping the last definition",
                    previous.name()
                );
            }
        }
        Self {
            name: catalog_name,
            tables: indexed,
        }
    }

    /// Build every table in `specs` against `keys` and assemble the catalog.
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] raised by a table.
    ///
    /// # Examples
    /// ```
    /// use gtfs_core::{ColumnSpec, SchemaCatalog, StaticPrimaryKeys, TableSpec};
    ///
    /// let specs = vec![TableSpec {
    ///     name: "stops".into(),
    ///     columns: vec![
    ///         ColumnSpec::new("stop_id", "Unique ID", "Required"),
    ///         ColumnSpec::new("stop_lat", "Latitude", "Conditionally Required"),
    ///     ],
    /// }];
    /// let catalog = SchemaCatalog::from_specs("gtfs", &specs, &StaticPrimaryKeys::gtfs())?;
    /// let stops = catalog.table("stops").expect("stops table");
    /// assert_eq!(stops.column_names().collect::<Vec<_>>(), ["rowid", "stop_lat"]);
    /// assert_eq!(stops.primary_keys(), ["rowid"]);
    /// # Ok::<(), gtfs_core::CatalogError>(())
    /// ```
    pub fn from_specs(
        name: impl Into<String>,
        specs: &[TableSpec],
        keys: &dyn PrimaryKeySource,
    ) -> Result<Self, CatalogError> {
        let tables = specs
            .iter()
            .map(|spec| TableDefinition::from_spec(spec, keys))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, tables))
    }

    /// Catalog name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a table definition.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.get(name)
    }

    /// Look up a table definition, failing when the catalog lacks it.
    ///
    /// # Errors
    /// Returns [`SchemaMismatch`] naming the missing table.
    pub fn require_table(&self, name: &str) -> Result<&TableDefinition, SchemaMismatch> {
        self.table(name).ok_or_else(|| SchemaMismatch {
            table: name.to_owned(),
        })
    }

    /// Iterate over tables in catalog order.
    pub fn tables(&self) -> impl ExactSizeIterator<Item = &TableDefinition> {
        self.tables.values()
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::keys::{NoPrimaryKeys, StaticPrimaryKeys};
    use rstest::{fixture, rstest};

    #[fixture]
    fn stop_times_spec() -> TableSpec {
        TableSpec {
            name: "stop_times".into(),
            columns: vec![
                ColumnSpec::new("trip_id", "ID referencing trips.trip_id", "Required"),
                ColumnSpec::new("arrival_time", "Time", "Conditionally Required"),
                ColumnSpec::new("stop_id", "ID referencing stops.stop_id", "Required"),
                ColumnSpec::new("stop_sequence", "Non-negative integer", "Required"),
                ColumnSpec::new("shape_dist_traveled", "Non-negative float", "Optional"),
            ],
        }
    }

    #[rstest]
    fn preserves_column_order_and_marks_keys(stop_times_spec: TableSpec) {
        let table = TableDefinition::from_spec(&stop_times_spec, &StaticPrimaryKeys::gtfs())
            .expect("build stop_times");

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            [
                "trip_id",
                "arrival_time",
                "rowid",
                "stop_sequence",
                "shape_dist_traveled"
            ]
        );
        assert_eq!(table.primary_keys(), ["trip_id", "rowid", "stop_sequence"]);
        let rowid = table.column("rowid").expect("aliased stop column");
        assert!(rowid.is_primary_key());
        assert!(!rowid.is_nullable());
        assert_eq!(rowid.column_type(), ColumnType::Integer);
        let distance = table.column("shape_dist_traveled").expect("distance column");
        assert!(!distance.is_primary_key());
        assert!(distance.is_nullable());
    }

    #[rstest]
    fn key_columns_are_never_nullable(stop_times_spec: TableSpec) {
        let table = TableDefinition::from_spec(&stop_times_spec, &StaticPrimaryKeys::gtfs())
            .expect("build stop_times");
        for column in table.columns() {
            if column.is_primary_key() {
                assert!(!column.is_nullable(), "{} should be NOT NULL", column.name());
            }
        }
    }

    #[rstest]
    fn rejects_keys_missing_from_the_schema() {
        let spec = TableSpec {
            name: "trips".into(),
            columns: vec![ColumnSpec::new("route_id", "Unique ID", "Required")],
        };
        let err = TableDefinition::from_spec(&spec, &StaticPrimaryKeys::gtfs())
            .expect_err("trip_id key is missing");
        assert_eq!(
            err,
            CatalogError::UnknownPrimaryKey {
                table: "trips".into(),
                column: "trip_id".into(),
            }
        );
    }

    #[rstest]
    fn key_source_names_are_aliased() {
        const UNALIASED: &[(&str, &[&str])] = &[("stops", &["stop_id"])];
        let keys = StaticPrimaryKeys::from_entries(UNALIASED);
        let spec = TableSpec {
            name: "stops".into(),
            columns: vec![ColumnSpec::new("stop_id", "Unique ID", "Required")],
        };
        let table = TableDefinition::from_spec(&spec, &keys).expect("build stops");
        assert_eq!(table.primary_keys(), ["rowid"]);
    }

    #[rstest]
    fn duplicate_tables_keep_the_last_definition() {
        let first = TableDefinition::build(
            "agency",
            vec![ColumnDefinition::new("agency_id", ColumnType::Text, true)],
            &NoPrimaryKeys,
        )
        .expect("first agency");
        let routes = TableDefinition::build("routes", Vec::new(), &NoPrimaryKeys).expect("routes");
        let second = TableDefinition::build(
            "agency",
            vec![ColumnDefinition::new("agency_name", ColumnType::Text, false)],
            &NoPrimaryKeys,
        )
        .expect("second agency");

        let catalog = SchemaCatalog::new("gtfs", [first, routes, second.clone()]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.table("agency"), Some(&second));
        let names: Vec<&str> = catalog.tables().map(TableDefinition::name).collect();
        assert_eq!(names, ["agency", "routes"]);
    }

    #[rstest]
    fn reports_missing_tables() {
        let catalog = SchemaCatalog::new("gtfs", Vec::new());
        assert!(catalog.is_empty());
        let err = catalog
            .require_table("fares")
            .expect_err("empty catalog has no tables");
        assert_eq!(err.table, "fares");
        assert_eq!(
            err.to_string(),
            "table `fares` is not defined in the schema catalog"
        );
    }
}
