//! Build manifest reading and per-entry resolution
//!
//! The bundler emits a manifest listing logical entry file names plus, in
//! production, one generated HTML fragment per entry listing its chunk
//! files in load order. `ManifestReader` turns one manifest entry into the
//! concrete imports to serve:
//!
//! - development: the entry's own unhashed bundle file, no version token
//! - production: every `<script src>` of the entry's fragment, each stamped
//!   with a content hash of the file it references

use std::fs;
use std::io::ErrorKind;

use scraper::{Html, Selector};
use serde::Deserialize;

use crate::assets::ResolvedImport;
use crate::config::ResolverConfig;
use crate::error::{BundlemapError, BundlemapResult};
use crate::hash::ContentHash;

/// One logical entry point declared by the build
///
/// Identity is the logical name, derived by stripping everything from the
/// first `.` of the source file name (`"main.js"` -> `"main"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    logical_name: String,
    source_file_name: String,
}

impl ManifestEntry {
    /// Derive an entry from a manifest file name
    pub fn from_file_name(file_name: &str) -> Self {
        let logical_name = file_name.split('.').next().unwrap_or(file_name);
        Self {
            logical_name: logical_name.to_string(),
            source_file_name: file_name.to_string(),
        }
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn source_file_name(&self) -> &str {
        &self.source_file_name
    }
}

/// JSON shape of `entries.json`
#[derive(Debug, Deserialize)]
struct ManifestFile {
    entries: Vec<String>,
}

/// Reads manifests and resolves entries against the bundler output on disk
pub struct ManifestReader<'a> {
    config: &'a ResolverConfig,
}

impl<'a> ManifestReader<'a> {
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    /// Read the script entry manifest, in declaration order
    pub fn read_manifest(&self) -> BundlemapResult<Vec<ManifestEntry>> {
        let path = self.config.script_manifest_path();
        let content = fs::read_to_string(&path).map_err(|e| BundlemapError::ManifestUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let manifest: ManifestFile =
            serde_json::from_str(&content).map_err(|e| BundlemapError::ManifestUnreadable {
                path,
                message: e.to_string(),
            })?;
        Ok(manifest
            .entries
            .iter()
            .map(|name| ManifestEntry::from_file_name(name))
            .collect())
    }

    /// Read the style entry manifest
    ///
    /// A missing style manifest means the project ships no stylesheets;
    /// a present but malformed one is an error.
    pub fn read_style_manifest(&self) -> BundlemapResult<Vec<ManifestEntry>> {
        let path = self.config.style_manifest_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BundlemapError::ManifestUnreadable {
                    path,
                    message: e.to_string(),
                })
            }
        };
        let manifest: ManifestFile =
            serde_json::from_str(&content).map_err(|e| BundlemapError::ManifestUnreadable {
                path,
                message: e.to_string(),
            })?;
        Ok(manifest
            .entries
            .iter()
            .map(|name| ManifestEntry::from_file_name(name))
            .collect())
    }

    /// Resolve one script entry into its ordered imports
    pub fn resolve_entry(&self, entry: &ManifestEntry) -> BundlemapResult<Vec<ResolvedImport>> {
        if self.config.mode.is_dev() {
            return Ok(vec![ResolvedImport::unversioned(
                self.config.bundle_url(entry.logical_name()),
            )]);
        }

        let fragment_path = self.config.fragment_path(entry.logical_name());
        let html =
            fs::read_to_string(&fragment_path).map_err(|e| BundlemapError::FragmentUnreadable {
                path: fragment_path.clone(),
                message: e.to_string(),
            })?;

        let mut imports = Vec::new();
        for src in fragment_script_srcs(&html) {
            let src = normalize_src(&src);
            let file_path = self.config.asset_path(&src);
            let bytes = fs::read(&file_path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => BundlemapError::BundleFileMissing { path: file_path },
                _ => BundlemapError::Io(e),
            })?;
            let hash = ContentHash::from_bytes(&bytes);
            imports.push(ResolvedImport::versioned(
                self.config.asset_url(&src),
                hash.token(),
            ));
        }
        Ok(imports)
    }

    /// Resolve one stylesheet entry
    pub fn resolve_style(&self, entry: &ManifestEntry) -> BundlemapResult<ResolvedImport> {
        let url = self.config.style_url(entry.logical_name());
        if self.config.mode.is_dev() {
            return Ok(ResolvedImport::unversioned(url));
        }

        let file_path = self.config.style_path(entry.logical_name());
        let bytes = fs::read(&file_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BundlemapError::BundleFileMissing { path: file_path },
            _ => BundlemapError::Io(e),
        })?;
        Ok(ResolvedImport::versioned(
            url,
            ContentHash::from_bytes(&bytes).token(),
        ))
    }
}

/// Extract `src` attributes of `<script>` elements, in document order
///
/// Script elements without a `src` are presumed inline and skipped.
fn fragment_script_srcs(html: &str) -> Vec<String> {
    // Selector literal is valid, parse cannot fail.
    let selector = Selector::parse("script").expect("static selector");
    let document = Html::parse_document(html);
    let mut srcs = Vec::new();
    for element in document.select(&selector) {
        match element.value().attr("src") {
            Some(src) => srcs.push(src.to_string()),
            None => log::debug!("skipping script element without src attribute"),
        }
    }
    srcs
}

/// Delete `/..` path-escape segments emitted by some bundler configurations
fn normalize_src(src: &str) -> String {
    src.replace("/..", "")
}
