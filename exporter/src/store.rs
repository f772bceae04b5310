//! Filesystem capability layer.
//!
//! The pipeline never touches `std::fs` directly; it goes through the
//! [`FileStore`] trait so the same logic runs against the real disk or a
//! test double. [`DiskStore`] is the production implementation.

use crate::error::{ExportError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Filesystem operations the export pipeline depends on.
///
/// Listing methods return paths sorted by name so downstream consumers
/// (notably the archiver) behave deterministically.
#[cfg_attr(test, mockall::automock)]
pub trait FileStore {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Utf8Path) -> bool;

    /// Create `path` and any missing parents with the given mode.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when creation fails.
    fn create_dir_all(&self, path: &Utf8Path, mode: u32) -> Result<()>;

    /// Copy a single file, overwriting the target if present.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the copy fails.
    fn copy_file(&self, source: &Utf8Path, target: &Utf8Path) -> Result<()>;

    /// Move a single file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the move fails.
    fn move_file(&self, source: &Utf8Path, target: &Utf8Path) -> Result<()>;

    /// Recursively delete a directory tree.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when deletion fails.
    fn remove_tree(&self, path: &Utf8Path) -> Result<()>;

    /// Change the permission mode of a file or directory.
    ///
    /// A no-op on platforms without Unix permission bits.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the mode change fails.
    fn set_mode(&self, path: &Utf8Path, mode: u32) -> Result<()>;

    /// Read a file's contents.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the read fails.
    fn read(&self, path: &Utf8Path) -> Result<Vec<u8>>;

    /// A file's last modification time.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the metadata query fails.
    fn modified(&self, path: &Utf8Path) -> Result<SystemTime>;

    /// All directories below `root`, recursively, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when traversal fails.
    fn directories(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>>;

    /// All regular files below `root`, recursively, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when traversal fails.
    fn files(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>>;
}

/// The real-disk [`FileStore`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    fn walk(root: &Utf8Path, want_dirs: bool) -> Result<Vec<Utf8PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .and_then(Utf8Path::from_path)
                    .map_or_else(|| root.to_owned(), Utf8Path::to_path_buf);
                ExportError::io(path, e.into())
            })?;
            let matches = if want_dirs {
                entry.file_type().is_dir()
            } else {
                entry.file_type().is_file()
            };
            if !matches {
                continue;
            }
            let path = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(|p| {
                ExportError::io(
                    root,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("non-UTF-8 path below {root}: {}", p.display()),
                    ),
                )
            })?;
            paths.push(path);
        }
        Ok(paths)
    }
}

impl FileStore for DiskStore {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    fn is_dir(&self, path: &Utf8Path) -> bool {
        path.as_std_path().is_dir()
    }

    fn create_dir_all(&self, path: &Utf8Path, mode: u32) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path).map_err(|e| ExportError::io(path, e))
    }

    fn copy_file(&self, source: &Utf8Path, target: &Utf8Path) -> Result<()> {
        fs::copy(source, target)
            .map(|_| ())
            .map_err(|e| ExportError::io(source, e))
    }

    fn move_file(&self, source: &Utf8Path, target: &Utf8Path) -> Result<()> {
        fs::rename(source, target).map_err(|e| ExportError::io(source, e))
    }

    fn remove_tree(&self, path: &Utf8Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| ExportError::io(path, e))
    }

    fn set_mode(&self, path: &Utf8Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(mode))
                .map_err(|e| ExportError::io(path, e))
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode);
            Ok(())
        }
    }

    fn read(&self, path: &Utf8Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| ExportError::io(path, e))
    }

    fn modified(&self, path: &Utf8Path) -> Result<SystemTime> {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| ExportError::io(path, e))
    }

    fn directories(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        Self::walk(root, true)
    }

    fn files(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        Self::walk(root, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[test]
    fn listing_is_recursive_and_sorted() {
        let (_guard, root) = temp_root();
        let store = DiskStore;
        store
            .create_dir_all(&root.join("b/nested"), 0o755)
            .expect("create dirs");
        store.create_dir_all(&root.join("a"), 0o755).expect("create dirs");
        std::fs::write(root.join("b/nested/two.txt"), b"2").expect("write");
        std::fs::write(root.join("a/one.txt"), b"1").expect("write");

        let dirs = store.directories(&root).expect("list dirs");
        let relative: Vec<_> = dirs
            .iter()
            .map(|d| d.strip_prefix(&root).expect("child path").as_str())
            .collect();
        assert_eq!(relative, vec!["a", "b", "b/nested"]);

        let files = store.files(&root).expect("list files");
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(&root).expect("child path").as_str())
            .collect();
        assert_eq!(relative, vec!["a/one.txt", "b/nested/two.txt"]);
    }

    #[test]
    fn copy_and_move_round_trip() {
        let (_guard, root) = temp_root();
        let store = DiskStore;
        let original = root.join("original.txt");
        std::fs::write(&original, b"payload").expect("write");

        let copied = root.join("copied.txt");
        store.copy_file(&original, &copied).expect("copy");
        assert!(store.exists(&original));
        assert!(store.exists(&copied));

        let moved = root.join("moved.txt");
        store.move_file(&copied, &moved).expect("move");
        assert!(!store.exists(&copied));
        assert_eq!(std::fs::read(moved).expect("read"), b"payload");
    }

    #[test]
    fn remove_tree_deletes_recursively() {
        let (_guard, root) = temp_root();
        let store = DiskStore;
        store
            .create_dir_all(&root.join("tree/deep"), 0o755)
            .expect("create");
        std::fs::write(root.join("tree/deep/file.txt"), b"x").expect("write");

        store.remove_tree(&root.join("tree")).expect("remove");
        assert!(!store.exists(&root.join("tree")));
    }

    #[cfg(unix)]
    #[test]
    fn set_mode_changes_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let (_guard, root) = temp_root();
        let store = DiskStore;
        let file = root.join("mode.txt");
        std::fs::write(&file, b"x").expect("write");

        store.set_mode(&file, 0o640).expect("chmod");
        let mode = std::fs::metadata(&file).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn modified_returns_a_timestamp() {
        let (_guard, root) = temp_root();
        let store = DiskStore;
        let file = root.join("stamp.txt");
        std::fs::write(&file, b"x").expect("write");
        let stamp = store.modified(&file).expect("mtime");
        assert!(stamp <= SystemTime::now());
    }
}
