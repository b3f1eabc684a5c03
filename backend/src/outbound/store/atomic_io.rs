//! Temp-file-and-rename writes inside a capability directory.
//!
//! A reader opening the target sees either the previous payload or the new
//! one, never a prefix of it.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
///
/// `file_name` must be a single normal path component.
pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let mut components = Utf8Path::new(file_name).components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{file_name} is not a plain file name"),
        ));
    };

    let tmp_name = temp_name_for(name);
    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        discard(dir, &tmp_name);
        return Err(err);
    }
    if let Err(err) = replace(dir, &tmp_name, name) {
        discard(dir, &tmp_name);
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn temp_name_for(name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    // Windows rename refuses to overwrite.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

fn discard(dir: &Dir, tmp_name: &str) {
    if dir.remove_file(tmp_name).is_err() {
        // Already gone or never created.
    }
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Not supported on every platform.
    }
}
