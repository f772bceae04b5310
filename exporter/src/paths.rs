//! Path rules for the four extension archetypes.
//!
//! Each type has a fixed manifest location and a fixed set of content
//! source trees. The rules are resolved into one record per export run
//! rather than branched on throughout the pipeline, so adding an
//! archetype means adding one match arm here.

use crate::config::ExportConfig;
use crate::extension::{ClientId, ExportRequest, ExtensionType};
use camino::{Utf8Path, Utf8PathBuf};

/// The content source trees staged for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSources {
    /// A component's two halves, staged administrator-first.
    Split {
        /// Source tree under the administrator root.
        administrator: Utf8PathBuf,
        /// Source tree under the site root.
        site: Utf8PathBuf,
    },
    /// A single tree staged straight into the bucket root.
    Single(Utf8PathBuf),
}

/// Resolved filesystem locations for one export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePaths {
    /// Absolute path of the manifest descriptor file.
    pub manifest: Utf8PathBuf,
    /// Content source trees, in staging order.
    pub sources: ContentSources,
}

/// The installation root hosting the requested client side.
#[must_use]
pub fn client_root<'a>(config: &'a ExportConfig, client: ClientId) -> &'a Utf8Path {
    match client {
        ClientId::Site => &config.site_root,
        ClientId::Administrator => &config.admin_root,
    }
}

/// Resolve the manifest and content locations for a request.
#[must_use]
pub fn resolve(config: &ExportConfig, request: &ExportRequest) -> TypePaths {
    let name = request.name();
    let base = request.base_name();
    let client = client_root(config, request.client());

    match request.extension_type() {
        ExtensionType::Component => TypePaths {
            manifest: client
                .join("components")
                .join(name)
                .join(format!("{base}.xml")),
            sources: ContentSources::Split {
                administrator: config.admin_root.join("components").join(name),
                site: config.site_root.join("components").join(name),
            },
        },
        ExtensionType::Module => {
            let source = client.join("modules").join(name);
            TypePaths {
                manifest: source.join(format!("mod_{base}.xml")),
                sources: ContentSources::Single(source),
            }
        }
        ExtensionType::Plugin => {
            // Plugins are always hosted on the site side, whatever the
            // requested client.
            let group = request.plugin_group().unwrap_or_default();
            let source = config.site_root.join("plugins").join(group).join(name);
            TypePaths {
                manifest: source.join(format!("{name}.xml")),
                sources: ContentSources::Single(source),
            }
        }
        ExtensionType::Template => {
            let source = client.join("templates").join(name);
            TypePaths {
                manifest: source.join("templateDetails.xml"),
                sources: ContentSources::Single(source),
            }
        }
    }
}

/// The site-side language root of the installation.
#[must_use]
pub fn site_language_root(config: &ExportConfig) -> Utf8PathBuf {
    config.site_root.join("language")
}

/// The administrator-side language root of the installation.
#[must_use]
pub fn admin_language_root(config: &ExportConfig) -> Utf8PathBuf {
    config.admin_root.join("language")
}

/// Join a manifest-declared folder onto a root, treating an empty folder
/// as the root itself.
#[must_use]
pub fn join_folder(root: &Utf8Path, folder: &str) -> Utf8PathBuf {
    if folder.is_empty() {
        root.to_owned()
    } else {
        root.join(folder)
    }
}
