//! Recursive directory staging.
//!
//! Copies a source tree into a target tree, creating missing directories
//! with the configured mode and merging into whatever already exists at
//! the target. A missing source is a legitimate state (extensions may
//! have no media or no administrator half) and copies nothing.

use crate::error::Result;
use crate::store::FileStore;
use camino::Utf8Path;

/// Recursively copy `source` into `target`.
///
/// Directory structure is recreated first, then files are copied over,
/// overwriting same-named files already present in the target. Returns
/// without error, and without touching the target, when `source` is not
/// an existing directory.
///
/// # Errors
///
/// Returns [`crate::error::ExportError::Io`] when a directory cannot be
/// created or a file cannot be copied.
pub fn copy_directory(
    store: &dyn FileStore,
    source: &Utf8Path,
    target: &Utf8Path,
    dir_mode: u32,
) -> Result<()> {
    if !store.is_dir(source) {
        return Ok(());
    }

    store.create_dir_all(target, dir_mode)?;

    for directory in store.directories(source)? {
        let Ok(relative) = directory.strip_prefix(source) else {
            continue;
        };
        store.create_dir_all(&target.join(relative), dir_mode)?;
    }

    for file in store.files(source)? {
        let Ok(relative) = file.strip_prefix(source) else {
            continue;
        };
        store.copy_file(&file, &target.join(relative))?;
    }

    Ok(())
}
