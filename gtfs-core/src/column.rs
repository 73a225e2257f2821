//! Storage types and column definitions.

use std::fmt;

use crate::alias::apply_alias;

/// Requirement label that marks a column as mandatory in the reference.
pub const REQUIRED_LABEL: &str = "Required";

/// SQLite storage class assigned to a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Whole numbers, identifiers referencing numeric keys and enumerations.
    Integer,
    /// Floating point values such as coordinates.
    Real,
    /// Everything else.
    Text,
}

impl ColumnType {
    /// Map a free-text type label from the reference documentation to a
    /// storage type.
    ///
    /// The function is total: labels outside the fixed lookup table fall back
    /// to [`ColumnType::Text`] because the upstream vocabulary is not stable.
    /// The SQL keywords themselves are part of the table so persisted
    /// definitions classify back to the same type.
    ///
    /// # Examples
    /// ```
    /// use gtfs_core::ColumnType;
    ///
    /// assert_eq!(ColumnType::classify("Non-negative integer"), ColumnType::Integer);
    /// assert_eq!(ColumnType::classify("Latitude"), ColumnType::Real);
    /// assert_eq!(ColumnType::classify("Route description"), ColumnType::Text);
    /// ```
    #[must_use]
    pub fn classify(label: &str) -> Self {
        match label {
            "INTEGER"
            | "ID referencing stops.stop_id"
            | "ID referencing routes.route_id"
            | "Non-negative integer"
            | "Enum"
            | "ID for all tables" => Self::Integer,
            "REAL" | "Latitude" | "Longitude" => Self::Real,
            _ => Self::Text,
        }
    }

    /// SQL keyword used in `CREATE TABLE` statements.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single typed column of a [`TableDefinition`](crate::TableDefinition).
///
/// Instances are only mutated while their table is being assembled; once the
/// catalog exists they are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    primary_key: bool,
}

impl ColumnDefinition {
    /// Construct a column from an already resolved type and nullability.
    ///
    /// The `stop_id` alias is applied to `name`.
    #[must_use]
    pub fn new(name: &str, column_type: ColumnType, nullable: bool) -> Self {
        Self {
            name: apply_alias(name).to_owned(),
            column_type,
            nullable,
            primary_key: false,
        }
    }

    /// Build a column from the labels found in the reference documentation.
    ///
    /// # Examples
    /// ```
    /// use gtfs_core::{ColumnDefinition, ColumnType};
    ///
    /// let column = ColumnDefinition::from_labels("stop_id", "Unique ID", "Required");
    /// assert_eq!(column.name(), "rowid");
    /// assert_eq!(column.column_type(), ColumnType::Text);
    /// assert!(!column.is_nullable());
    /// ```
    #[must_use]
    pub fn from_labels(name: &str, type_label: &str, requirement_label: &str) -> Self {
        Self::new(
            name,
            ColumnType::classify(type_label),
            requirement_label != REQUIRED_LABEL,
        )
    }

    /// Column name after aliasing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Whether the column accepts nulls. Always `false` for key columns.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the column belongs to its table's primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub(crate) const fn mark_primary_key(&mut self) {
        self.primary_key = true;
        self.nullable = false;
    }
}

/// Reference-documentation labels describing one column before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Raw column name as documented.
    pub name: String,
    /// Free-text type label, classified with [`ColumnType::classify`].
    pub type_label: String,
    /// Requirement label; only `Required` makes the column non-nullable.
    pub requirement_label: String,
}

impl ColumnSpec {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_label: impl Into<String>,
        requirement_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
            requirement_label: requirement_label.into(),
        }
    }

    /// Resolve the labels into a [`ColumnDefinition`].
    #[must_use]
    pub fn to_definition(&self) -> ColumnDefinition {
        ColumnDefinition::from_labels(&self.name, &self.type_label, &self.requirement_label)
    }
}
