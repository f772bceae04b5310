//! CLI argument definitions for the extension exporter.
//!
//! Separated from the binary entrypoint so argument parsing and the
//! conversion into library types stay testable without spawning a
//! process.

use crate::config::ExportConfig;
use crate::error::Result;
use crate::extension::{ClientId, ExportRequest, ExtensionType};
use camino::Utf8PathBuf;
use clap::Parser;

/// Package a CMS extension into a versioned ZIP archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "extension-exporter")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package a CMS extension into a versioned ZIP archive.\n\n",
    "The exporter reads the extension's manifest from the installation, ",
    "stages its program, language, and media files into a working ",
    "directory, archives the result, and normalizes permissions. The ",
    "produced archive is named <bucket>-<version>.zip, where the bucket ",
    "is the extension name (components, modules), tpl_<name> (templates), ",
    "or plg_<group>_<name> (plugins).",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Export a system plugin:\n",
    "    $ extension-exporter --type plugin --group system --name cache \\\n",
    "        --site-root /var/www --admin-root /var/www/administrator \\\n",
    "        --export-dir /tmp/export\n\n",
    "  Export an administrator-side module:\n",
    "    $ extension-exporter --type module --client administrator --name mod_logged \\\n",
    "        --site-root /var/www --admin-root /var/www/administrator \\\n",
    "        --export-dir /tmp/export",
))]
pub struct Cli {
    /// Extension name, including its conventional prefix (com_, mod_, ...).
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Extension type: component, module, plugin, or template.
    #[arg(long = "type", value_name = "TYPE")]
    pub extension_type: String,

    /// Hosting side for modules and templates: site or administrator.
    #[arg(long, value_name = "CLIENT", default_value = "site")]
    pub client: String,

    /// Plugin group; required for plugins.
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Root of the site half of the installation.
    #[arg(long, value_name = "DIR")]
    pub site_root: Utf8PathBuf,

    /// Root of the administrator half of the installation.
    #[arg(long, value_name = "DIR")]
    pub admin_root: Utf8PathBuf,

    /// Directory receiving the staging tree and the archive.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Utf8PathBuf,

    /// Permission mode for exported directories, in octal.
    #[arg(long, value_name = "MODE", value_parser = parse_octal_mode, default_value = "755")]
    pub dir_mode: u32,

    /// Permission mode for exported files and the archive, in octal.
    #[arg(long, value_name = "MODE", value_parser = parse_octal_mode, default_value = "644")]
    pub file_mode: u32,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Build the validated export request from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ExportError::UnsupportedType`] for an
    /// unknown type or client value and
    /// [`crate::error::ExportError::MissingPluginGroup`] for a plugin
    /// without a group.
    pub fn request(&self) -> Result<ExportRequest> {
        let extension_type: ExtensionType = self.extension_type.parse()?;
        let client: ClientId = self.client.parse()?;
        ExportRequest::new(
            self.name.clone(),
            extension_type,
            client,
            self.group.clone(),
        )
    }

    /// Build the export configuration from the parsed arguments.
    #[must_use]
    pub fn config(&self) -> ExportConfig {
        ExportConfig::new(
            self.export_dir.clone(),
            self.site_root.clone(),
            self.admin_root.clone(),
        )
        .with_dir_mode(self.dir_mode)
        .with_file_mode(self.file_mode)
    }
}

/// Parse a permission mode given in octal notation.
fn parse_octal_mode(value: &str) -> std::result::Result<u32, String> {
    u32::from_str_radix(value, 8).map_err(|e| format!("invalid octal mode '{value}': {e}"))
}
