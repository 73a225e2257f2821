//! CSV decoding of a single feed table.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use gtfs_core::{Cell, RawTable};

use super::FeedError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Decode one CSV table.
///
/// The first record is the header; a leading UTF-8 byte-order mark is
/// removed from it. Empty fields become nulls. Records whose length differs
/// from the header are rejected.
///
/// # Errors
/// Returns [`FeedError::MissingHeader`] for empty input and
/// [`FeedError::Csv`] for malformed or ragged records.
///
/// # Examples
/// ```
/// use gtfs_data::feed::read_csv_table;
///
/// let table = read_csv_table("trips", "\u{feff}route_id,trip_id\nR1,\n".as_bytes())?;
/// assert_eq!(table.header, ["route_id", "trip_id"]);
/// assert_eq!(table.rows, [vec![Some("R1".to_owned()), None]]);
/// # Ok::<(), gtfs_data::feed::FeedError>(())
/// ```
pub fn read_csv_table<R: Read>(name: &str, reader: R) -> Result<RawTable, FeedError> {
    let csv_error = |source| FeedError::Csv {
        table: name.to_owned(),
        source,
    };
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header: Vec<String> = csv
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(index, field)| {
            if index == 0 {
                field.trim_start_matches(BYTE_ORDER_MARK).to_owned()
            } else {
                field.to_owned()
            }
        })
        .collect();
    if header.is_empty() {
        return Err(FeedError::MissingHeader {
            table: name.to_owned(),
        });
    }

    let rows = csv
        .records()
        .map(|record| record.map(|fields| cells(&fields)).map_err(csv_error))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawTable::new(name, header, rows))
}

fn cells(record: &StringRecord) -> Vec<Cell> {
    record
        .iter()
        .map(|field| (!field.is_empty()).then(|| field.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_fields_are_null() {
        let table = read_csv_table("stops", "stop_id,stop_name,stop_code\nS1,,7\n".as_bytes())
            .expect("decode");
        assert_eq!(
            table.rows,
            [vec![Some("S1".to_owned()), None, Some("7".to_owned())]]
        );
    }

    #[rstest]
    fn quoted_fields_keep_delimiters() {
        let csv = "agency_name,agency_url\n\"Metro, Inc\",x\n";
        let table = read_csv_table("agency", csv.as_bytes()).expect("decode");
        assert_eq!(table.rows[0][0].as_deref(), Some("Metro, Inc"));
    }

    #[rstest]
    fn header_only_tables_have_no_rows() {
        let table = read_csv_table("trips", "route_id,trip_id\n".as_bytes()).expect("decode");
        assert_eq!(table.header, ["route_id", "trip_id"]);
        assert!(table.rows.is_empty());
    }

    #[rstest]
    fn ragged_rows_are_rejected() {
        let err = read_csv_table("trips", "route_id,trip_id\nR1\n".as_bytes())
            .expect_err("ragged row");
        assert!(matches!(err, FeedError::Csv { table, .. } if table == "trips"));
    }

    #[rstest]
    fn empty_input_has_no_header() {
        let err = read_csv_table("trips", "".as_bytes()).expect_err("empty file");
        assert!(matches!(err, FeedError::MissingHeader { .. }));
    }
}
