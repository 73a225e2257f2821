use camino::{Utf8Path, Utf8PathBuf};

/// Outcome of loading one feed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    /// Table name.
    pub table: String,
    /// Rows inserted.
    pub rows: usize,
    /// Feed columns discarded because the catalog does not define them.
    pub dropped: Vec<String>,
    /// Catalog columns absent from the feed and stored as nulls.
    pub filled: Vec<String>,
}

/// Summary of a committed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    output: Utf8PathBuf,
    tables: Vec<TableReport>,
}

impl ConversionReport {
    pub(super) const fn new(output: Utf8PathBuf, tables: Vec<TableReport>) -> Self {
        Self { output, tables }
    }

    /// Database written by the run.
    #[must_use]
    pub fn output(&self) -> &Utf8Path {
        &self.output
    }

    /// Per-table outcomes in processing order.
    #[must_use]
    pub fn tables(&self) -> &[TableReport] {
        &self.tables
    }

    /// Look up the outcome for one table.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == name)
    }

    /// Rows inserted across all tables.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|report| report.rows).sum()
    }
}
