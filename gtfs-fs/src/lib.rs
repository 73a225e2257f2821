//! Capability-based filesystem helpers shared by the GTFS conversion crates.
//!
//! Every helper resolves an ambient base directory once and performs the
//! actual operation through `cap-std`, so absolute and relative UTF-8 paths
//! behave the same way.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory containing `path` and return it with the file name.
///
/// The parent is opened with ambient authority, so relative parents that
/// climb out of the current directory (`../feed.zip`) resolve normally.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("path `{path}` has no file name")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Create every missing ancestor directory of `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Whether `path` names an existing regular file.
///
/// A missing file or a missing parent directory yields `Ok(false)`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Whether `path` names an existing directory.
pub fn dir_is_dir(path: &Utf8Path) -> io::Result<bool> {
    match fs_utf8::Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(_) => Ok(true),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Remove the file at `path`, returning whether a file was removed.
pub fn remove_file_if_exists(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.remove_file(name.as_str()) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_files(dir: &Utf8Path) -> io::Result<Vec<String>> {
    let opened = fs_utf8::Dir::open_ambient_dir(dir, ambient_authority())?;
    let mut names = Vec::new();
    for item in opened.entries()? {
        let entry = item?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name()?);
        }
    }
    names.sort();
    Ok(names)
}

/// Split `path` into an ambient base directory and the relative remainder.
///
/// The base is the leading run of root, prefix, `.` and `..` components, or
/// the current directory when there is none. The remainder never starts by
/// leaving the base, so `cap-std` accepts it.
pub fn base_dir_and_relative(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut base = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_)
            | Utf8Component::RootDir
            | Utf8Component::CurDir
            | Utf8Component::ParentDir
                if relative.as_str().is_empty() =>
            {
                base.push(component);
            }
            _ => relative.push(component),
        }
    }
    if base.as_str().is_empty() {
        base.push(".");
    }
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}
