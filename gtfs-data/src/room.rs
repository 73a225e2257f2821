//! Android Room entity sources generated from a catalog.
//!
//! Each table becomes a Kotlin `data class` whose fields mirror the table's
//! columns, so the SQLite file produced by a conversion can be bundled with
//! an Android app and read through Room.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use gtfs_core::{ColumnDefinition, ColumnType, SchemaCatalog, TableDefinition};
use gtfs_fs::base_dir_and_relative;
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use log::{debug, info};
use thiserror::Error;

/// Package declared by generated entities.
pub const ROOM_PACKAGE: &str = "com.example.bus_schedules.models";

/// Entities that are never generated.
pub const EXCLUDED_ENTITIES: &[&str] = &[
    "FareAttribute",
    "FareRule",
    "Frequencie",
    "Level",
    "Pathway",
];

/// Errors raised while writing entity sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoomExportError {
    /// The output directory could not be created or opened.
    #[error("failed to prepare entity directory {path}")]
    Directory {
        /// Target directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An entity file could not be written.
    #[error("failed to write entity {path}")]
    Write {
        /// Entity file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Files written and tables skipped by [`export_room_entities`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomExport {
    /// Entity files, in catalog order.
    pub written: Vec<Utf8PathBuf>,
    /// Tables whose entity is excluded.
    pub skipped: Vec<String>,
}

/// Entity class name for a table: upper camel case with one trailing `s`
/// removed.
///
/// # Examples
/// ```
/// use gtfs_data::room::entity_name;
///
/// assert_eq!(entity_name("stop_times"), "StopTime");
/// assert_eq!(entity_name("frequencies"), "Frequencie");
/// assert_eq!(entity_name("feed_info"), "FeedInfo");
/// ```
#[must_use]
pub fn entity_name(table: &str) -> String {
    let mut name = table.to_upper_camel_case();
    if name.ends_with('s') {
        name.pop();
    }
    name
}

fn kotlin_type(column: &ColumnDefinition) -> String {
    let base = match column.column_type() {
        ColumnType::Integer => "Integer",
        ColumnType::Real => "Double",
        ColumnType::Text => "String",
    };
    if column.is_nullable() {
        format!("{base}? = null")
    } else {
        base.to_owned()
    }
}

/// Render the Kotlin source of the entity for `table`.
///
/// Composite keys are declared on the `@Entity` annotation; a single key
/// column carries `@PrimaryKey`.
#[must_use]
pub fn render_entity(table: &TableDefinition) -> String {
    let composite = table.primary_keys().len() > 1;
    let key_clause = if composite {
        let keys: Vec<String> = table
            .primary_keys()
            .iter()
            .map(|key| format!("\"{key}\""))
            .collect();
        format!(", primaryKeys = [{}]", keys.join(","))
    } else {
        String::new()
    };
    let fields: Vec<String> = table
        .columns()
        .iter()
        .map(|column| {
            let marker = if column.is_primary_key() && !composite {
                "@PrimaryKey "
            } else {
                ""
            };
            format!(
                "\t{marker}@ColumnInfo(name = \"{}\") val {}: {}",
                column.name(),
                column.name().to_lower_camel_case(),
                kotlin_type(column)
            )
        })
        .collect();

    format!(
        "package {ROOM_PACKAGE}\n\n\
         import androidx.room.ColumnInfo\n\
         import androidx.room.Entity\n\
         import androidx.room.PrimaryKey\n\n\
         @Entity(tableName = \"{}\"{key_clause})\n\
         data class {}(\n{}\n)",
        table.name(),
        entity_name(table.name()),
        fields.join(",\n")
    )
}

/// Write one `<Entity>.kt` file per catalog table into `dir`.
///
/// The directory is created when missing. Tables whose entity name appears
/// in [`EXCLUDED_ENTITIES`] are skipped.
///
/// # Errors
/// Returns [`RoomExportError`] when the directory or a file cannot be
/// written.
pub fn export_room_entities(
    catalog: &SchemaCatalog,
    dir: &Utf8Path,
) -> Result<RoomExport, RoomExportError> {
    let directory_error = |source| RoomExportError::Directory {
        path: dir.to_path_buf(),
        source,
    };
    let (base, relative) = base_dir_and_relative(dir).map_err(directory_error)?;
    let target = if relative.as_str().is_empty() {
        base
    } else {
        base.create_dir_all(&relative).map_err(directory_error)?;
        base.open_dir(&relative).map_err(directory_error)?
    };

    let mut export = RoomExport::default();
    for table in catalog.tables() {
        let entity = entity_name(table.name());
        if EXCLUDED_ENTITIES.contains(&entity.as_str()) {
            debug!("skipping excluded entity {entity}");
            export.skipped.push(table.name().to_owned());
            continue;
        }
        let file_name = format!("{entity}.kt");
        target
            .write(file_name.as_str(), render_entity(table))
            .map_err(|source| RoomExportError::Write {
                path: dir.join(&file_name),
                source,
            })?;
        export.written.push(dir.join(file_name));
    }
    info!(
        "wrote {} Room entities to {dir}, skipped {}",
        export.written.len(),
        export.skipped.len()
    );
    Ok(export)
}
