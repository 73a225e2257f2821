//! Tests for the SQLite store.

use super::*;
use gtfs_core::{ColumnDefinition, ColumnType, NoPrimaryKeys, StaticPrimaryKeys};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn database_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 temp path")
}

fn routes() -> TableDefinition {
    TableDefinition::build(
        "routes",
        vec![
            ColumnDefinition::from_labels("route_id", "Unique ID", "Required"),
            ColumnDefinition::from_labels("route_type", "Enum", "Required"),
            ColumnDefinition::from_labels("route_color", "Color", "Optional"),
        ],
        &StaticPrimaryKeys::gtfs(),
    )
    .expect("build routes")
}

fn cell(value: &str) -> Cell {
    Some(value.to_owned())
}

#[rstest]
fn committed_tables_are_readable(temp_dir: TempDir) {
    let path = database_path(&temp_dir, "nested/feed.sqlite");
    let mut store = SqliteStore::create(&path).expect("create store");
    let transaction = store.transaction().expect("begin");
    let written = transaction
        .write_table(
            &routes(),
            &[
                vec![cell("R1"), cell("3"), None],
                vec![cell("R2"), cell("700"), cell("FF0000")],
            ],
        )
        .expect("write routes");
    transaction.commit().expect("commit");
    drop(store);
    assert_eq!(written, 2);

    let connection = Connection::open(path.as_std_path()).expect("reopen");
    let (route_type, color): (i64, Option<String>) = connection
        .query_row(
            "SELECT route_type, route_color FROM routes WHERE route_id = 'R1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("query route");
    assert_eq!(route_type, 3);
    assert_eq!(color, None);
}

#[rstest]
fn empty_tables_are_created(temp_dir: TempDir) {
    let path = database_path(&temp_dir, "feed.sqlite");
    let mut store = SqliteStore::create(&path).expect("create store");
    let transaction = store.transaction().expect("begin");
    assert_eq!(transaction.write_table(&routes(), &[]).expect("write"), 0);
    transaction.commit().expect("commit");

    let count: i64 = store
        .connection
        .query_row("SELECT COUNT(*) FROM routes", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(count, 0);
}

#[rstest]
fn key_violations_name_the_table_and_row(temp_dir: TempDir) {
    let path = database_path(&temp_dir, "feed.sqlite");
    let mut store = SqliteStore::create(&path).expect("create store");
    let transaction = store.transaction().expect("begin");
    let err = transaction
        .write_table(
            &routes(),
            &[vec![cell("R1"), cell("3"), None], vec![None, cell("3"), None]],
        )
        .expect_err("null key");
    match err {
        StoreError::InsertRow { table, row, .. } => {
            assert_eq!(table, "routes");
            assert_eq!(row, 1);
        }
        other => panic!("expected insert failure, got {other:?}"),
    }
}

#[rstest]
fn uncommitted_tables_roll_back(temp_dir: TempDir) {
    let path = database_path(&temp_dir, "feed.sqlite");
    let mut store = SqliteStore::create(&path).expect("create store");
    {
        let transaction = store.transaction().expect("begin");
        transaction
            .write_table(&routes(), &[vec![cell("R1"), cell("3"), None]])
            .expect("write");
    }
    let tables: i64 = store
        .connection
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 0);
}

#[rstest]
fn existing_databases_are_replaced(temp_dir: TempDir) {
    let path = database_path(&temp_dir, "feed.sqlite");
    std::fs::write(&path, b"stale").expect("write stale file");
    let mut store = SqliteStore::create(&path).expect("create store");
    let keyless = TableDefinition::build(
        "notes",
        vec![ColumnDefinition::new("note", ColumnType::Text, true)],
        &NoPrimaryKeys,
    )
    .expect("build notes");
    let transaction = store.transaction().expect("begin");
    transaction
        .write_table(&keyless, &[vec![cell("hello")]])
        .expect("write");
    transaction.commit().expect("commit");
    assert_eq!(store.path(), path.as_path());
}
