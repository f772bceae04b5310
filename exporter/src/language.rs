//! Selective copying of locale files into the staging tree.
//!
//! Language files live under a shared language root
//! (`<root>/language/<locale>/...`) rather than inside the extension's own
//! directory, so they are gathered separately. Each locale subdirectory is
//! probed for the extension's `.ini` and `.sys.ini` files; where a file
//! exists, its target path comes from the manifest's placement table, or
//! defaults to `<locale>/<file>`.

use crate::error::Result;
use crate::extension::FileBucket;
use crate::manifest::LanguageSection;
use crate::store::FileStore;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// The language-file suffixes probed per locale.
const LANGUAGE_SUFFIXES: [&str; 2] = ["ini", "sys.ini"];

/// One logical language location: a source root, the resolved target
/// root, and the placement table governing it.
#[derive(Debug)]
pub struct LanguageLocation<'a> {
    /// The language root scanned for locale subdirectories.
    pub source_root: Utf8PathBuf,
    /// The absolute target root language files are copied under.
    pub target_root: Utf8PathBuf,
    /// The manifest section whose placement table applies here.
    pub table: &'a LanguageSection,
}

/// Copy the bucket's language files from one location into the staging
/// tree.
///
/// Every directory below the source root is treated as a locale. A
/// missing source root copies nothing.
///
/// # Errors
///
/// Returns [`crate::error::ExportError::Io`] when a directory cannot be
/// created or a file cannot be copied.
pub fn copy_language_tree(
    store: &dyn FileStore,
    location: &LanguageLocation<'_>,
    bucket: &FileBucket,
    dir_mode: u32,
) -> Result<()> {
    if !store.is_dir(&location.source_root) {
        return Ok(());
    }

    for locale_dir in store.directories(&location.source_root)? {
        let Some(locale) = locale_dir.file_name() else {
            continue;
        };
        let locale = locale.to_owned();
        copy_locale_files(store, location, &locale_dir, &locale, bucket, dir_mode)?;
    }

    Ok(())
}

/// Copy the `.ini` and `.sys.ini` files of one locale, if present.
fn copy_locale_files(
    store: &dyn FileStore,
    location: &LanguageLocation<'_>,
    locale_dir: &Utf8Path,
    locale: &str,
    bucket: &FileBucket,
    dir_mode: u32,
) -> Result<()> {
    for suffix in LANGUAGE_SUFFIXES {
        let file_name = format!("{locale}.{bucket}.{suffix}");
        let source = locale_dir.join(&file_name);
        if !store.exists(&source) {
            continue;
        }

        let relative = resolve_target(location.table, locale, &file_name);
        let target = location.target_root.join(relative);
        debug!("language file {source} -> {target}");

        if let Some(parent) = target.parent() {
            store.create_dir_all(parent, dir_mode)?;
        }
        store.copy_file(&source, &target)?;
    }

    Ok(())
}

/// The target path for a language file, relative to the location's target
/// root.
///
/// The placement table wins when an entry's basename matches; otherwise
/// the file lands at `<locale>/<file>`.
fn resolve_target(table: &LanguageSection, locale: &str, file_name: &str) -> Utf8PathBuf {
    table.placement(file_name).map_or_else(
        || Utf8PathBuf::from(locale).join(file_name),
        Utf8PathBuf::from,
    )
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
