//! Export pipeline orchestration.
//!
//! One [`Exporter`] call stages an extension's files into a fresh bucket
//! directory, gathers its language and media files, archives the result,
//! and normalizes permissions. The pipeline is strictly sequential and
//! one-shot: failures propagate immediately and may leave a partial
//! staging tree, which the next run for the same bucket deletes up front.

use crate::archive::build_archive;
use crate::config::ExportConfig;
use crate::copier::copy_directory;
use crate::error::{ExportError, Result};
use crate::extension::{ExportRequest, ExtensionType, FileBucket, PackageName};
use crate::language::{LanguageLocation, copy_language_tree};
use crate::manifest::Manifest;
use crate::paths::{self, ContentSources, TypePaths, join_folder};
use crate::permissions::normalize;
use crate::store::FileStore;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};

/// Exports one extension per call against a fixed configuration.
pub struct Exporter<'a> {
    store: &'a dyn FileStore,
    config: &'a ExportConfig,
}

impl<'a> Exporter<'a> {
    /// Create an exporter over a file store and configuration.
    #[must_use]
    pub fn new(store: &'a dyn FileStore, config: &'a ExportConfig) -> Self {
        Self { store, config }
    }

    /// Export the requested extension and return its package name.
    ///
    /// The produced archive lands at
    /// `<export_dir>/<package name>.zip`; the staging tree at
    /// `<export_dir>/<bucket>` is left in place for inspection.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::ManifestNotFound`] when the extension's
    /// descriptor is absent, [`ExportError::ManifestParse`] when it is
    /// unreadable, and [`ExportError::Io`] / [`ExportError::Archive`] for
    /// filesystem and archiving failures. Nothing is retried.
    pub fn export(&self, request: &ExportRequest) -> Result<PackageName> {
        let type_paths = paths::resolve(self.config, request);
        let manifest = self.load_manifest(&type_paths.manifest)?;

        let bucket = request.file_bucket();
        let package = PackageName::new(bucket.clone(), manifest.version());
        let staging_root = self.config.export_dir.join(bucket.as_str());

        if self.store.is_dir(&staging_root) {
            debug!("removing stale staging tree {staging_root}");
            self.store.remove_tree(&staging_root)?;
        }

        self.stage_content(request, &manifest, &type_paths, &staging_root)?;

        if manifest.has_languages() {
            self.stage_languages(request, &manifest, &bucket, &staging_root)?;
        }

        if manifest.has_media() {
            self.stage_media(request, &manifest, &staging_root)?;
        }

        let archive_path = self.config.export_dir.join(package.archive_filename());
        debug!("building archive {archive_path}");
        build_archive(self.store, &staging_root, &archive_path)?;

        normalize(
            self.store,
            &staging_root,
            &archive_path,
            self.config.dir_mode,
            self.config.file_mode,
        )?;

        Ok(package)
    }

    /// Load and parse the manifest descriptor.
    fn load_manifest(&self, path: &Utf8Path) -> Result<Manifest> {
        if !self.store.exists(path) {
            return Err(ExportError::ManifestNotFound {
                path: path.to_owned(),
            });
        }
        let bytes = self.store.read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| ExportError::ManifestParse {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Manifest::parse(&text).map_err(|e| ExportError::ManifestParse {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Stage the extension's own content trees into the bucket.
    fn stage_content(
        &self,
        request: &ExportRequest,
        manifest: &Manifest,
        type_paths: &TypePaths,
        staging_root: &Utf8Path,
    ) -> Result<()> {
        match &type_paths.sources {
            ContentSources::Split {
                administrator,
                site,
            } => {
                copy_directory(
                    self.store,
                    administrator,
                    &join_folder(staging_root, manifest.admin_files_folder()),
                    self.config.dir_mode,
                )?;
                copy_directory(
                    self.store,
                    site,
                    &join_folder(staging_root, manifest.files_folder()),
                    self.config.dir_mode,
                )?;
                self.relocate_component_manifest(request, manifest, staging_root)
            }
            ContentSources::Single(source) => {
                copy_directory(self.store, source, staging_root, self.config.dir_mode)
            }
        }
    }

    /// Move a component's root manifest file from the staged
    /// administrator tree to the bucket root.
    ///
    /// The administrator tree is the canonical home; when the file is not
    /// there the site tree is used instead, with a warning. The fallback
    /// covers site-only components, so it is not an error.
    fn relocate_component_manifest(
        &self,
        request: &ExportRequest,
        manifest: &Manifest,
        staging_root: &Utf8Path,
    ) -> Result<()> {
        let manifest_name = format!("{}.xml", request.base_name());
        let admin_candidate =
            join_folder(staging_root, manifest.admin_files_folder()).join(&manifest_name);

        let source = if self.store.exists(&admin_candidate) {
            admin_candidate
        } else {
            warn!("{admin_candidate} not found, falling back to the site files tree");
            join_folder(staging_root, manifest.files_folder()).join(&manifest_name)
        };

        let target = staging_root.join(&manifest_name);
        if source == target {
            return Ok(());
        }
        self.store.move_file(&source, &target)
    }

    /// Gather language files across the applicable logical locations.
    ///
    /// Site languages come from the site language root; administrator
    /// languages from the administrator root. Plugins additionally pull
    /// from the administrator root into the site-side target, because
    /// plugin language files are installed there regardless of client.
    fn stage_languages(
        &self,
        request: &ExportRequest,
        manifest: &Manifest,
        bucket: &FileBucket,
        staging_root: &Utf8Path,
    ) -> Result<()> {
        let mut locations: Vec<LanguageLocation<'_>> = Vec::new();

        if let Some(table) = manifest.site_languages() {
            locations.push(LanguageLocation {
                source_root: paths::site_language_root(self.config),
                target_root: join_folder(staging_root, manifest.languages_folder()),
                table,
            });
        }

        if let Some(table) = manifest.admin_languages() {
            locations.push(LanguageLocation {
                source_root: paths::admin_language_root(self.config),
                target_root: join_folder(staging_root, manifest.admin_languages_folder()),
                table,
            });
        }

        if request.extension_type() == ExtensionType::Plugin {
            if let Some(table) = manifest.site_languages() {
                locations.push(LanguageLocation {
                    source_root: paths::admin_language_root(self.config),
                    target_root: join_folder(staging_root, manifest.languages_folder()),
                    table,
                });
            }
        }

        for location in &locations {
            copy_language_tree(self.store, location, bucket, self.config.dir_mode)?;
        }
        Ok(())
    }

    /// Copy the extension's media tree into the bucket.
    fn stage_media(
        &self,
        request: &ExportRequest,
        manifest: &Manifest,
        staging_root: &Utf8Path,
    ) -> Result<()> {
        let source: Utf8PathBuf = self
            .config
            .site_root
            .join("media")
            .join(manifest.media_source(request.name()));
        let target = join_folder(staging_root, manifest.media_folder());
        copy_directory(self.store, &source, &target, self.config.dir_mode)
    }
}

#[cfg(test)]
#[path = "exporter_tests.rs"]
mod tests;
