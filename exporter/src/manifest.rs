//! Read-only view of an extension's manifest descriptor.
//!
//! The manifest is an XML document declaring the extension version and,
//! optionally, where staged files, media, and language files land inside
//! the package. Attribute access follows a three-level fallback: an absent
//! tag, an absent attribute, and an empty attribute value all yield the
//! caller's default. An empty declared folder is indistinguishable from an
//! undeclared one.
//!
//! Only the parts the export pipeline consumes are modelled; unknown
//! elements (file lists, install scripts, field definitions) are ignored.

use camino::Utf8Path;
use serde::Deserialize;

/// Return the attribute value, or `default` when it is absent or empty.
fn attr_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

/// A section carrying only a target `folder` attribute.
#[derive(Debug, Clone, Default, Deserialize)]
struct FolderSection {
    #[serde(rename = "@folder")]
    folder: Option<String>,
}

/// The `media` section: target folder plus a source `destination`.
#[derive(Debug, Clone, Default, Deserialize)]
struct MediaSection {
    #[serde(rename = "@folder")]
    folder: Option<String>,
    #[serde(rename = "@destination")]
    destination: Option<String>,
}

/// One `<language>` entry: an explicit target path for a language file.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    /// The locale tag the entry belongs to, when declared.
    #[serde(rename = "@tag")]
    tag: Option<String>,
    /// The declared target path, relative to the language target root.
    #[serde(rename = "$text")]
    path: Option<String>,
}

impl LanguageEntry {
    /// The declared locale tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The declared target path.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// A `languages` section: target folder and the placement table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageSection {
    #[serde(rename = "@folder")]
    folder: Option<String>,
    #[serde(rename = "language", default)]
    entries: Vec<LanguageEntry>,
}

impl LanguageSection {
    /// The declared target folder, or `""`.
    #[must_use]
    pub fn folder(&self) -> &str {
        attr_or(self.folder.as_deref(), "")
    }

    /// The ordered placement table entries.
    #[must_use]
    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    /// Look up the declared target path whose basename equals `file_name`.
    ///
    /// Returns the first matching entry's full declared path; language
    /// files without an entry fall back to the `<locale>/<file>` default
    /// at the call site.
    #[must_use]
    pub fn placement(&self, file_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter_map(|entry| entry.path.as_deref())
            .find(|path| Utf8Path::new(path).file_name() == Some(file_name))
    }
}

/// The `administration` sub-section duplicating `files` and `languages`
/// for the administrator side of a component.
#[derive(Debug, Clone, Default, Deserialize)]
struct AdministrationSection {
    files: Option<FolderSection>,
    languages: Option<LanguageSection>,
}

/// A parsed, read-only extension manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    version: Option<String>,
    files: Option<FolderSection>,
    media: Option<MediaSection>,
    languages: Option<LanguageSection>,
    administration: Option<AdministrationSection>,
}

impl Manifest {
    /// Parse a manifest from its XML text.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error when the document is not well-formed
    /// XML or a modelled element has the wrong shape.
    pub fn parse(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }

    /// The declared version, or `""` when the element is missing.
    #[must_use]
    pub fn version(&self) -> &str {
        attr_or(self.version.as_deref(), "")
    }

    /// Target folder for site files, relative to the bucket root.
    #[must_use]
    pub fn files_folder(&self) -> &str {
        attr_or(
            self.files.as_ref().and_then(|s| s.folder.as_deref()),
            "",
        )
    }

    /// Target folder for administrator files, relative to the bucket root.
    #[must_use]
    pub fn admin_files_folder(&self) -> &str {
        attr_or(
            self.administration
                .as_ref()
                .and_then(|a| a.files.as_ref())
                .and_then(|s| s.folder.as_deref()),
            "",
        )
    }

    /// Whether the manifest declares a media section.
    #[must_use]
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    /// Source directory name under the site's `media/` tree.
    ///
    /// Defaults to `default` (conventionally the extension name) when the
    /// attribute is absent or empty.
    #[must_use]
    pub fn media_source<'a>(&'a self, default: &'a str) -> &'a str {
        attr_or(
            self.media.as_ref().and_then(|s| s.destination.as_deref()),
            default,
        )
    }

    /// Target folder for media files, relative to the bucket root.
    #[must_use]
    pub fn media_folder(&self) -> &str {
        attr_or(
            self.media.as_ref().and_then(|s| s.folder.as_deref()),
            "",
        )
    }

    /// The site-side languages section, when declared.
    #[must_use]
    pub fn site_languages(&self) -> Option<&LanguageSection> {
        self.languages.as_ref()
    }

    /// The administrator-side languages section, when declared.
    #[must_use]
    pub fn admin_languages(&self) -> Option<&LanguageSection> {
        self.administration.as_ref().and_then(|a| a.languages.as_ref())
    }

    /// Target folder for site language files, relative to the bucket root.
    #[must_use]
    pub fn languages_folder(&self) -> &str {
        attr_or(
            self.languages.as_ref().and_then(|s| s.folder.as_deref()),
            "",
        )
    }

    /// Target folder for administrator language files, relative to the
    /// bucket root.
    #[must_use]
    pub fn admin_languages_folder(&self) -> &str {
        attr_or(
            self.administration
                .as_ref()
                .and_then(|a| a.languages.as_ref())
                .and_then(|s| s.folder.as_deref()),
            "",
        )
    }

    /// Whether any languages section is declared, on either side.
    #[must_use]
    pub fn has_languages(&self) -> bool {
        self.languages.is_some() || self.admin_languages().is_some()
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
