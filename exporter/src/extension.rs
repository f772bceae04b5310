//! Extension identity: type, client side, and derived package naming.
//!
//! The file bucket is the canonical identifier for one extension's staged
//! files. It doubles as the staging directory name and, combined with the
//! manifest version, as the archive's base name.

use crate::error::{ExportError, Result};
use std::fmt;
use std::str::FromStr;

/// The four extension archetypes the exporter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionType {
    /// A component with separate administrator and site trees.
    Component,
    /// A module hosted on either the site or administrator side.
    Module,
    /// A plugin, grouped under a plugin group on the site side.
    Plugin,
    /// A template hosted on either the site or administrator side.
    Template,
}

impl ExtensionType {
    /// The canonical lower-case name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionType::Component => "component",
            ExtensionType::Module => "module",
            ExtensionType::Plugin => "plugin",
            ExtensionType::Template => "template",
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionType {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "component" => Ok(ExtensionType::Component),
            "module" => Ok(ExtensionType::Module),
            "plugin" => Ok(ExtensionType::Plugin),
            "template" => Ok(ExtensionType::Template),
            other => Err(ExportError::UnsupportedType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Which half of the CMS installation hosts the extension.
///
/// Only meaningful for modules and templates; components always span both
/// halves and plugins always live on the site side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientId {
    /// The site (front-end) half, client id 0.
    #[default]
    Site,
    /// The administrator (back-end) half, client id 1.
    Administrator,
}

impl ClientId {
    /// Map the numeric client id used by CMS manifests and databases.
    ///
    /// `0` is the site; any other value is the administrator.
    #[must_use]
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            ClientId::Site
        } else {
            ClientId::Administrator
        }
    }
}

impl FromStr for ClientId {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "site" | "0" => Ok(ClientId::Site),
            "administrator" | "admin" | "1" => Ok(ClientId::Administrator),
            other => Err(ExportError::UnsupportedType {
                value: other.to_owned(),
            }),
        }
    }
}

/// A validated request to export one extension.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    name: String,
    extension_type: ExtensionType,
    client: ClientId,
    plugin_group: Option<String>,
}

impl ExportRequest {
    /// Validate and build an export request.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingPluginGroup`] when a plugin export is
    /// requested without a group.
    pub fn new(
        name: impl Into<String>,
        extension_type: ExtensionType,
        client: ClientId,
        plugin_group: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if extension_type == ExtensionType::Plugin
            && plugin_group.as_deref().is_none_or(str::is_empty)
        {
            return Err(ExportError::MissingPluginGroup { name });
        }
        Ok(Self {
            name,
            extension_type,
            client,
            plugin_group,
        })
    }

    /// The extension's full name, including any type prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The extension type.
    #[must_use]
    pub fn extension_type(&self) -> ExtensionType {
        self.extension_type
    }

    /// Which half of the installation hosts the extension.
    #[must_use]
    pub fn client(&self) -> ClientId {
        self.client
    }

    /// The plugin group; always present for plugins.
    #[must_use]
    pub fn plugin_group(&self) -> Option<&str> {
        self.plugin_group.as_deref()
    }

    /// The name with its conventional type prefix stripped.
    ///
    /// Components drop a leading `com_` and modules a leading `mod_`;
    /// other types use the full name. Manifest filenames are built from
    /// this base.
    #[must_use]
    pub fn base_name(&self) -> &str {
        let prefix = match self.extension_type {
            ExtensionType::Component => "com_",
            ExtensionType::Module => "mod_",
            _ => return &self.name,
        };
        self.name.strip_prefix(prefix).unwrap_or(&self.name)
    }

    /// Derive the file bucket for this request.
    #[must_use]
    pub fn file_bucket(&self) -> FileBucket {
        FileBucket::derive(
            self.extension_type,
            &self.name,
            self.plugin_group.as_deref(),
        )
    }
}

/// The canonical staging-directory and archive-base identifier for one
/// extension.
///
/// Components and modules use their name unchanged, templates gain a
/// `tpl_` prefix, and plugins fold in their group as
/// `plg_<group>_<name>`.
///
/// # Examples
///
/// ```
/// use extension_exporter::extension::{ExtensionType, FileBucket};
///
/// let bucket = FileBucket::derive(ExtensionType::Plugin, "cache", Some("system"));
/// assert_eq!(bucket.as_str(), "plg_system_cache");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBucket(String);

impl FileBucket {
    /// Derive the bucket from type, name, and (for plugins) group.
    #[must_use]
    pub fn derive(extension_type: ExtensionType, name: &str, group: Option<&str>) -> Self {
        let bucket = match extension_type {
            ExtensionType::Component | ExtensionType::Module => name.to_owned(),
            ExtensionType::Template => format!("tpl_{name}"),
            ExtensionType::Plugin => {
                let group = group.unwrap_or_default();
                format!("plg_{group}_{name}")
            }
        };
        Self(bucket)
    }

    /// The bucket as a path segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The archive base name, `<bucket>-<version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    bucket: FileBucket,
    version: String,
}

impl PackageName {
    /// Combine a bucket and a manifest version.
    #[must_use]
    pub fn new(bucket: FileBucket, version: impl Into<String>) -> Self {
        Self {
            bucket,
            version: version.into(),
        }
    }

    /// The bucket component.
    #[must_use]
    pub fn bucket(&self) -> &FileBucket {
        &self.bucket
    }

    /// The filename of the archive this package is written to.
    #[must_use]
    pub fn archive_filename(&self) -> String {
        format!("{self}.zip")
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.bucket, self.version)
    }
}
