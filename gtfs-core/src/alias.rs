//! The `stop_id` → `rowid` identifier alias.
//!
//! Stops double as the content table of full-text-search joins, so their
//! identifier is stored in SQLite's implicit row identifier. The rename is
//! applied once when catalog columns are built and once when raw headers are
//! normalised; nothing else renames columns.

/// Column name rewritten by the alias rule.
pub const ALIASED_COLUMN: &str = "stop_id";

/// Replacement name for [`ALIASED_COLUMN`].
pub const ROW_ID_COLUMN: &str = "rowid";

/// Apply the alias rule to a single column name.
///
/// Only an exact match is rewritten; names that merely contain `stop_id`
/// (`from_stop_id`, `parent_stop_id`) are left alone. Applying the rule twice
/// is a no-op.
///
/// # Examples
/// ```
/// use gtfs_core::apply_alias;
///
/// assert_eq!(apply_alias("stop_id"), "rowid");
/// assert_eq!(apply_alias("rowid"), "rowid");
/// assert_eq!(apply_alias("from_stop_id"), "from_stop_id");
/// ```
#[must_use]
pub fn apply_alias(name: &str) -> &str {
    if name == ALIASED_COLUMN {
        ROW_ID_COLUMN
    } else {
        name
    }
}

/// Apply the alias rule to every entry of a raw header.
#[must_use]
pub fn normalise_header<S: AsRef<str>>(header: &[S]) -> Vec<String> {
    header
        .iter()
        .map(|name| apply_alias(name.as_ref()).to_owned())
        .collect()
}
