//! Tests for directory and archive feeds.

use super::*;
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path")
}

fn write_archive(path: &Utf8Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).expect("create archive");
    let mut writer = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .expect("add directory");
            continue;
        }
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(contents.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive");
}

#[rstest]
fn directory_tables_follow_file_name_order(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    fs::write(root.join("trips.txt"), "route_id,trip_id\nR1,T1\n").expect("write trips");
    fs::write(root.join("agency.txt"), "agency_id\nA\n").expect("write agency");
    fs::create_dir(root.join("nested")).expect("create nested dir");

    let mut feed = open_feed(&root).expect("open feed");
    assert_eq!(feed.location(), root.as_path());
    assert_eq!(feed.table_names(), ["agency", "trips"]);
    let trips = feed.read_table("trips").expect("read trips");
    assert_eq!(trips.name, "trips");
    assert_eq!(trips.header, ["route_id", "trip_id"]);
    assert_eq!(trips.rows.len(), 1);
}

#[rstest]
fn archive_tables_follow_archive_order(temp_dir: TempDir) {
    let path = utf8_root(&temp_dir).join("feed.zip");
    write_archive(
        &path,
        &[
            ("trips.txt", "route_id,trip_id\nR1,T1\nR2,T2\n"),
            ("agency.txt", "agency_id\nA\n"),
            ("extras/", ""),
            ("extras/notes.txt", "note\nx\n"),
        ],
    );

    let mut feed = open_feed(&path).expect("open feed");
    assert_eq!(feed.table_names(), ["trips", "agency"]);
    let trips = feed.read_table("trips").expect("read trips");
    assert_eq!(trips.rows.len(), 2);
    let agency = feed.read_table("agency").expect("read agency");
    assert_eq!(agency.rows, [vec![Some("A".to_owned())]]);
}

#[rstest]
fn unknown_tables_are_reported(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    fs::write(root.join("agency.txt"), "agency_id\nA\n").expect("write agency");
    let mut feed = DirectoryFeed::open(&root).expect("open feed");
    let err = feed.read_table("routes").expect_err("missing table");
    assert!(matches!(err, FeedError::UnknownTable { table } if table == "routes"));
}

#[rstest]
fn non_archives_are_rejected(temp_dir: TempDir) {
    let path = utf8_root(&temp_dir).join("feed.zip");
    fs::write(&path, "not a zip").expect("write file");
    let err = open_feed(&path).expect_err("invalid archive");
    assert!(matches!(err, FeedError::Archive { .. }));
}

#[rstest]
fn missing_paths_are_not_found(temp_dir: TempDir) {
    let path = utf8_root(&temp_dir).join("absent.zip");
    let err = open_feed(&path).expect_err("missing feed");
    assert!(matches!(err, FeedError::NotFound { .. }));
}
