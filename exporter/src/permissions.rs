//! Post-export permission normalization.
//!
//! Directory copies inherit whatever modes the source environment had, so
//! after the archive is built every staged file is forced to the
//! configured file mode, every staged directory to the directory mode,
//! and the archive itself to the file mode.

use crate::error::Result;
use crate::store::FileStore;
use camino::Utf8Path;

/// Normalize modes across a staging tree and its archive.
///
/// # Errors
///
/// Returns [`crate::error::ExportError::Io`] when a mode change fails.
pub fn normalize(
    store: &dyn FileStore,
    staging_root: &Utf8Path,
    archive_path: &Utf8Path,
    dir_mode: u32,
    file_mode: u32,
) -> Result<()> {
    for file in store.files(staging_root)? {
        store.set_mode(&file, file_mode)?;
    }
    for directory in store.directories(staging_root)? {
        store.set_mode(&directory, dir_mode)?;
    }
    store.set_mode(archive_path, file_mode)
}
