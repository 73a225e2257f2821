//! Primary-key sources consulted while assembling catalog tables.

use std::collections::BTreeMap;

/// Supplies the ordered primary-key column names for a table.
///
/// Tables unknown to the source have no key; that is not an error.
pub trait PrimaryKeySource {
    /// Ordered key columns for `table`, empty when the source has none.
    fn keys_for(&self, table: &str) -> Vec<String>;
}

const GTFS_PRIMARY_KEYS: &[(&str, &[&str])] = &[
    ("agency", &["agency_id"]),
    ("calendar", &["service_id"]),
    ("calendar_dates", &["service_id", "date"]),
    ("feed_info", &["feed_publisher_name"]),
    ("routes", &["route_id"]),
    ("shapes", &["shape_id", "shape_pt_sequence"]),
    ("stops", &["rowid"]),
    ("stop_times", &["trip_id", "rowid", "stop_sequence"]),
    ("transfers", &["from_stop_id", "to_stop_id"]),
    ("trips", &["trip_id"]),
];

/// Curated table → key mapping used when no persisted catalog is supplied.
///
/// # Examples
/// ```
/// use gtfs_core::{PrimaryKeySource, StaticPrimaryKeys};
///
/// let keys = StaticPrimaryKeys::gtfs();
/// assert_eq!(keys.keys_for("calendar_dates"), vec!["service_id", "date"]);
/// assert!(keys.keys_for("levels").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPrimaryKeys {
    keys: BTreeMap<&'static str, &'static [&'static str]>,
}

impl StaticPrimaryKeys {
    /// Keys for the static GTFS reference tables.
    ///
    /// Stop identifiers already use the aliased `rowid` name.
    #[must_use]
    pub fn gtfs() -> Self {
        Self::from_entries(GTFS_PRIMARY_KEYS)
    }

    /// Build a mapping from explicit entries. Later entries replace earlier
    /// ones for the same table.
    #[must_use]
    pub fn from_entries(entries: &[(&'static str, &'static [&'static str])]) -> Self {
        Self {
            keys: entries.iter().copied().collect(),
        }
    }
}

impl PrimaryKeySource for StaticPrimaryKeys {
    fn keys_for(&self, table: &str) -> Vec<String> {
        self.keys
            .get(table)
            .map(|columns| columns.iter().map(|&column| column.to_owned()).collect())
            .unwrap_or_default()
    }
}

/// Primary keys read verbatim from a previously exported catalog definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedPrimaryKeys {
    keys: BTreeMap<String, Vec<String>>,
}

impl PersistedPrimaryKeys {
    /// Wrap an already decoded table → keys mapping.
    #[must_use]
    pub const fn new(keys: BTreeMap<String, Vec<String>>) -> Self {
        Self { keys }
    }
}

impl FromIterator<(String, Vec<String>)> for PersistedPrimaryKeys {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PrimaryKeySource for PersistedPrimaryKeys {
    fn keys_for(&self, table: &str) -> Vec<String> {
        self.keys.get(table).cloned().unwrap_or_default()
    }
}

/// A source without any keys; every table is key-less.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPrimaryKeys;

impl PrimaryKeySource for NoPrimaryKeys {
    fn keys_for(&self, _table: &str) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("agency", &["agency_id"])]
    #[case("stops", &["rowid"])]
    #[case("stop_times", &["trip_id", "rowid", "stop_sequence"])]
    #[case("transfers", &["from_stop_id", "to_stop_id"])]
    #[case("pathways", &[])]
    fn static_keys_cover_the_reference_tables(#[case] table: &str, #[case] expected: &[&str]) {
        assert_eq!(StaticPrimaryKeys::gtfs().keys_for(table), expected);
    }

    #[rstest]
    fn persisted_keys_preserve_order() {
        let keys: PersistedPrimaryKeys = [(
            "shapes".to_owned(),
            vec!["shape_pt_sequence".to_owned(), "shape_id".to_owned()],
        )]
        .into_iter()
        .collect();
        assert_eq!(
            keys.keys_for("shapes"),
            vec!["shape_pt_sequence", "shape_id"]
        );
        assert!(keys.keys_for("trips").is_empty());
    }

    #[rstest]
    fn empty_source_has_no_keys() {
        assert!(NoPrimaryKeys.keys_for("trips").is_empty());
    }
}
