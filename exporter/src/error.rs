//! Error types for the extension exporter.
//!
//! Export failures carry the path they occurred on so that a failed run can
//! be diagnosed without re-tracing the pipeline. Configuration errors are
//! raised before any filesystem mutation; everything else propagates from
//! the step that failed, leaving a partial staging tree behind.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting an extension.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested extension type is not one the exporter understands.
    #[error("extensions of type '{value}' are not supported")]
    UnsupportedType {
        /// The rejected type value.
        value: String,
    },

    /// A plugin export was requested without naming the plugin group.
    #[error("plugin {name} requires a plugin group")]
    MissingPluginGroup {
        /// Name of the plugin missing its group.
        name: String,
    },

    /// The extension's manifest file is absent from its expected location.
    #[error("no manifest found (expected {path})")]
    ManifestNotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// The manifest file exists but could not be parsed.
    #[error("invalid manifest at {path}: {reason}")]
    ManifestParse {
        /// Path of the unparseable manifest.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {path}")]
    Io {
        /// Path the operation failed on.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the ZIP archive failed.
    #[error("archive error on {path}")]
    Archive {
        /// Path of the archive being written.
        path: Utf8PathBuf,
        /// The underlying zip-writer error.
        #[source]
        source: zip::result::ZipError,
    },
}

impl ExportError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a zip-writer error with the archive path.
    pub fn archive(path: impl Into<Utf8PathBuf>, source: zip::result::ZipError) -> Self {
        ExportError::Archive {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`ExportError`].
pub type Result<T> = std::result::Result<T, ExportError>;
