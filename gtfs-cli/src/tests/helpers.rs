//! Test helpers for composing feeds and stored definitions on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use std::{env, fs};
use tempfile::TempDir;

const DEFINITION: &str = r#"{
    "database_name": "gtfs",
    "tables": {
        "stops": {
            "table_name": "stops",
            "columns": [
                {"column_name": "stop_id", "column_type": "TEXT", "is_not_null": true},
                {"column_name": "stop_name", "column_type": "TEXT", "is_not_null": false},
                {"column_name": "stop_lat", "column_type": "REAL", "is_not_null": false}
            ],
            "primary_keys": ["stop_id"]
        },
        "levels": {
            "table_name": "levels",
            "columns": [
                {"column_name": "level_id", "column_type": "TEXT", "is_not_null": true}
            ],
            "primary_keys": ["level_id"]
        }
    }
}"#;

/// Temporary workspace holding a feed directory and a stored definition.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        fs::create_dir(root.join("feed")).expect("create feed dir");
        fs::write(root.join("reference.json"), DEFINITION).expect("write definition");
        Self { _dir: dir, root }
    }

    pub(super) fn with_table(self, file_name: &str, contents: &str) -> Self {
        fs::write(self.root.join("feed").join(file_name), contents).expect("write feed table");
        self
    }

    pub(super) fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    pub(super) fn feed(&self) -> Utf8PathBuf {
        self.path("feed")
    }

    pub(super) fn definition(&self) -> Utf8PathBuf {
        self.path("reference.json")
    }
}

/// Switches the process working directory and restores it on drop.
pub(super) struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub(super) fn enter(dir: &Utf8Path) -> Self {
        let previous = env::current_dir().expect("read working directory");
        env::set_current_dir(dir).expect("enter working directory");
        Self { previous }
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        env::set_current_dir(&self.previous)
            .unwrap_or_else(|err| panic!("failed to restore working directory: {err}"));
    }
}
