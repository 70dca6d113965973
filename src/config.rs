//! Resolver configuration
//!
//! The original deployment of this logic discovered its triggers through
//! runtime hook lookups; here everything is supplied up front through a
//! single registration struct owned by whoever drives the render/rebuild
//! lifecycle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Build/serve mode for asset resolution
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// True when serving unhashed bundles straight from the bundler output
    pub fn is_dev(&self) -> bool {
        matches!(self, Mode::Development)
    }
}

/// Static configuration for the asset resolver
///
/// `root_dir` is the filesystem directory the bundler writes into;
/// `base_url` is the public URL prefix the same files are served under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Filesystem root containing the bundler output
    pub root_dir: PathBuf,

    /// Public URL prefix for served assets (no trailing slash)
    #[serde(default)]
    pub base_url: String,

    /// Directory under `root_dir` holding the script manifest, bundles and
    /// generated fragments
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,

    /// Directory under `root_dir` holding the style manifest and stylesheets
    #[serde(default = "default_styles_dir")]
    pub styles_dir: String,

    #[serde(default)]
    pub mode: Mode,

    /// Rebuild unconditionally on startup (iterative development)
    #[serde(default)]
    pub always_rebuild: bool,

    /// Rebuild lazily at request end when the stored marker is stale
    #[serde(default = "default_true")]
    pub auto_deploy: bool,

    /// Version of the running application, compared against the stored marker
    pub app_version: String,

    /// Prefix prepended to logical names to form enqueue handles
    #[serde(default = "default_handle_prefix")]
    pub handle_prefix: String,
}

fn default_scripts_dir() -> String {
    "includes/js".to_string()
}

fn default_styles_dir() -> String {
    "includes/css".to_string()
}

fn default_handle_prefix() -> String {
    "bm-".to_string()
}

fn default_true() -> bool {
    true
}

impl ResolverConfig {
    /// Minimal configuration for the given bundler root and app version
    pub fn new(root_dir: impl Into<PathBuf>, app_version: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            base_url: String::new(),
            scripts_dir: default_scripts_dir(),
            styles_dir: default_styles_dir(),
            mode: Mode::default(),
            always_rebuild: false,
            auto_deploy: true,
            app_version: app_version.into(),
            handle_prefix: default_handle_prefix(),
        }
    }

    /// Path of the script entry manifest (`entries.json`)
    pub fn script_manifest_path(&self) -> PathBuf {
        self.root_dir.join(&self.scripts_dir).join("entries.json")
    }

    /// Path of the style entry manifest (`entries.json`)
    pub fn style_manifest_path(&self) -> PathBuf {
        self.root_dir.join(&self.styles_dir).join("entries.json")
    }

    /// Path of the generated chunk fragment for a logical entry name
    pub fn fragment_path(&self, logical_name: &str) -> PathBuf {
        self.root_dir
            .join(&self.scripts_dir)
            .join(format!("{}-scripts.html", logical_name))
    }

    /// Public URL of an entry's own bundle file (development mode)
    pub fn bundle_url(&self, logical_name: &str) -> String {
        join_url(
            &join_url(&self.base_url, &self.scripts_dir),
            &format!("{}.bundle.js", logical_name),
        )
    }

    /// Filesystem path of a stylesheet for a logical entry name
    pub fn style_path(&self, logical_name: &str) -> PathBuf {
        self.root_dir
            .join(&self.styles_dir)
            .join(format!("{}.css", logical_name))
    }

    /// Public URL of a stylesheet for a logical entry name
    pub fn style_url(&self, logical_name: &str) -> String {
        join_url(
            &join_url(&self.base_url, &self.styles_dir),
            &format!("{}.css", logical_name),
        )
    }

    /// Public URL of a root-relative source path from a fragment
    pub fn asset_url(&self, src: &str) -> String {
        join_url(&self.base_url, src)
    }

    /// Filesystem path of a root-relative source path from a fragment
    pub fn asset_path(&self, src: &str) -> PathBuf {
        let relative = src.trim_start_matches('/');
        self.root_dir.join(Path::new(relative))
    }
}

/// Join a URL prefix and a relative segment with exactly one `/` between them
fn join_url(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    if base.is_empty() {
        format!("/{}", segment)
    } else if segment.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, segment)
    }
}
