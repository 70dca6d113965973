//! Common test utilities for bundlemap scenario tests.
//!
//! Provides `TestEnv` - an isolated bundler output directory with helpers
//! to lay down manifests, fragments, bundles and stylesheets the way a
//! webpack-style build would.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use bundlemap::{AssetResolver, JsonAssetStore, Mode, ResolverConfig};

/// Isolated bundler output tree rooted in a temp directory
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write the script entry manifest (`includes/js/entries.json`)
    pub fn write_manifest(&self, entries: &[&str]) {
        let names: Vec<String> = entries.iter().map(|e| format!("\"{}\"", e)).collect();
        self.write_file(
            "includes/js/entries.json",
            format!("{{\"entries\": [{}]}}", names.join(", ")).as_bytes(),
        );
    }

    /// Write the style entry manifest (`includes/css/entries.json`)
    pub fn write_style_manifest(&self, entries: &[&str]) {
        let names: Vec<String> = entries.iter().map(|e| format!("\"{}\"", e)).collect();
        self.write_file(
            "includes/css/entries.json",
            format!("{{\"entries\": [{}]}}", names.join(", ")).as_bytes(),
        );
    }

    /// Write a generated chunk fragment listing script srcs in load order
    pub fn write_fragment(&self, logical_name: &str, srcs: &[&str]) {
        let tags: Vec<String> = srcs
            .iter()
            .map(|src| format!("<script src=\"{}\"></script>", src))
            .collect();
        self.write_file(
            &format!("includes/js/{}-scripts.html", logical_name),
            tags.join("\n").as_bytes(),
        );
    }

    /// Write a file relative to the bundler root, creating parent dirs
    pub fn write_file(&self, relative: &str, content: &[u8]) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write file");
    }

    /// Config rooted in this environment
    pub fn config(&self, mode: Mode, app_version: &str) -> ResolverConfig {
        let mut config = ResolverConfig::new(self.root.path(), app_version);
        config.mode = mode;
        config
    }

    /// Resolver with a JSON store under `state/assets.json`
    pub fn resolver(&self, mode: Mode, app_version: &str) -> AssetResolver<JsonAssetStore> {
        AssetResolver::new(self.config(mode, app_version), self.store())
    }

    /// A fresh store handle over this environment's state file
    pub fn store(&self) -> JsonAssetStore {
        JsonAssetStore::new(self.state_path())
    }

    pub fn state_path(&self) -> PathBuf {
        self.path("state/assets.json")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 hex token for expected version assertions
pub fn hash_token(content: &[u8]) -> String {
    bundlemap::ContentHash::from_bytes(content).token().to_string()
}

#[allow(dead_code)]
pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}
