//! ZIP archive construction from a staging tree.
//!
//! Entry names are relative to the staging root and entry timestamps
//! carry the source files' modification times, so re-exporting unchanged
//! sources reproduces the archive byte for byte. The base directory is an
//! explicit parameter; no process-global working directory is involved.

use crate::error::{ExportError, Result};
use crate::store::FileStore;
use camino::Utf8Path;
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs::File;
use std::io::Write;
use std::time::SystemTime;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Build a ZIP archive of every regular file below `staging_root`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when a source file cannot be read or the
/// archive file cannot be written, and [`ExportError::Archive`] when the
/// zip writer rejects an entry.
pub fn build_archive(
    store: &dyn FileStore,
    staging_root: &Utf8Path,
    archive_path: &Utf8Path,
) -> Result<()> {
    let file = File::create(archive_path).map_err(|e| ExportError::io(archive_path, e))?;
    let mut writer = ZipWriter::new(file);

    for path in store.files(staging_root)? {
        let Ok(relative) = path.strip_prefix(staging_root) else {
            continue;
        };
        let timestamp = store
            .modified(&path)
            .ok()
            .and_then(dos_timestamp)
            .unwrap_or_default();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(timestamp);

        writer
            .start_file(relative.as_str(), options)
            .map_err(|e| ExportError::archive(archive_path, e))?;
        let contents = store.read(&path)?;
        writer
            .write_all(&contents)
            .map_err(|e| ExportError::io(archive_path, e))?;
    }

    writer
        .finish()
        .map_err(|e| ExportError::archive(archive_path, e))?;
    Ok(())
}

/// Convert a filesystem mtime to a DOS timestamp, in local time.
///
/// Returns `None` for times the ZIP format cannot represent (before
/// 1980); callers fall back to the format's epoch.
fn dos_timestamp(mtime: SystemTime) -> Option<zip::DateTime> {
    let local: DateTime<Local> = mtime.into();
    let year = u16::try_from(local.year()).ok()?;
    let month = u8::try_from(local.month()).ok()?;
    let day = u8::try_from(local.day()).ok()?;
    let hour = u8::try_from(local.hour()).ok()?;
    let minute = u8::try_from(local.minute()).ok()?;
    let second = u8::try_from(local.second()).ok()?;
    zip::DateTime::from_date_and_time(year, month, day, hour, minute, second).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DiskStore;
    use camino::Utf8PathBuf;
    use std::io::Read;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    fn populate_staging(root: &Utf8Path) -> Utf8PathBuf {
        let staging = root.join("mod_login");
        std::fs::create_dir_all(staging.join("tmpl")).expect("create staging");
        std::fs::write(staging.join("mod_login.php"), b"<?php\n").expect("write");
        std::fs::write(staging.join("tmpl/default.php"), b"<?php echo 1;\n").expect("write");
        staging
    }

    #[test]
    fn entry_names_are_relative_to_the_staging_root() {
        let (_guard, root) = temp_root();
        let staging = populate_staging(&root);
        let archive_path = root.join("mod_login-1.0.0.zip");

        build_archive(&DiskStore, &staging, &archive_path).expect("archive");

        let file = std::fs::File::open(&archive_path).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("read archive");
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).expect("entry").name().to_owned())
            .collect();
        assert_eq!(names, vec!["mod_login.php", "tmpl/default.php"]);
        for name in names {
            assert!(!name.starts_with('/'), "absolute entry name: {name}");
        }
    }

    #[test]
    fn entry_contents_round_trip() {
        let (_guard, root) = temp_root();
        let staging = populate_staging(&root);
        let archive_path = root.join("out.zip");

        build_archive(&DiskStore, &staging, &archive_path).expect("archive");

        let file = std::fs::File::open(&archive_path).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("read archive");
        let mut entry = archive.by_name("tmpl/default.php").expect("entry");
        let mut contents = String::new();
        entry.read_to_string(&mut contents).expect("read entry");
        assert_eq!(contents, "<?php echo 1;\n");
    }

    #[test]
    fn entry_timestamps_track_source_mtimes() {
        let (_guard, root) = temp_root();
        let staging = populate_staging(&root);
        let archive_path = root.join("out.zip");

        build_archive(&DiskStore, &staging, &archive_path).expect("archive");

        let source_mtime = std::fs::metadata(staging.join("mod_login.php"))
            .and_then(|m| m.modified())
            .expect("source mtime");
        let expected = dos_timestamp(source_mtime).expect("representable mtime");

        let file = std::fs::File::open(&archive_path).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("read archive");
        let entry = archive.by_name("mod_login.php").expect("entry");
        let actual = entry.last_modified().expect("entry timestamp");
        assert_eq!((actual.year(), actual.month(), actual.day()), (
            expected.year(),
            expected.month(),
            expected.day()
        ));
        assert_eq!((actual.hour(), actual.minute()), (expected.hour(), expected.minute()));
    }

    #[test]
    fn rebuilding_unchanged_sources_is_byte_identical() {
        let (_guard, root) = temp_root();
        let staging = populate_staging(&root);
        let first = root.join("first.zip");
        let second = root.join("second.zip");

        build_archive(&DiskStore, &staging, &first).expect("archive");
        build_archive(&DiskStore, &staging, &second).expect("archive");

        let first_bytes = std::fs::read(&first).expect("read first");
        let second_bytes = std::fs::read(&second).expect("read second");
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn empty_staging_tree_yields_an_empty_archive() {
        let (_guard, root) = temp_root();
        let staging = root.join("empty");
        std::fs::create_dir_all(&staging).expect("create staging");
        let archive_path = root.join("empty.zip");

        build_archive(&DiskStore, &staging, &archive_path).expect("archive");

        let file = std::fs::File::open(&archive_path).expect("open archive");
        let archive = zip::ZipArchive::new(file).expect("read archive");
        assert_eq!(archive.len(), 0);
    }
}
