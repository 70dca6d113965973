//! Resolved asset data model
//!
//! Pure data structures produced by a rebuild pass and persisted until the
//! next one. Import order inside an entry mirrors the order the bundler
//! declared the chunks and is load-order-critical, so it is kept as a
//! sequence through serialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One concrete script or stylesheet reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImport {
    /// Public URL of the file as served
    pub url: String,
    /// Cache-busting version token; absent in development mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ResolvedImport {
    /// A development-mode import, served unhashed
    pub fn unversioned(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            version: None,
        }
    }

    /// A production-mode import with a content-derived version token
    pub fn versioned(url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            version: Some(version.into()),
        }
    }
}

/// All imports of one logical script entry, in load order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResolvedEntry {
    pub imports: Vec<ResolvedImport>,
}

impl ResolvedEntry {
    pub fn new(imports: Vec<ResolvedImport>) -> Self {
        Self { imports }
    }
}

/// Resolution result for every logical entry name known at the last rebuild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetMapping {
    /// Script entries keyed by logical name
    #[serde(default)]
    pub scripts: BTreeMap<String, ResolvedEntry>,

    /// Stylesheet entries keyed by logical name
    #[serde(default)]
    pub styles: BTreeMap<String, ResolvedImport>,
}

impl AssetMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }

    /// Look up a script entry by logical name
    pub fn script(&self, logical_name: &str) -> Option<&ResolvedEntry> {
        self.scripts.get(logical_name)
    }

    /// Look up a stylesheet by logical name
    pub fn style(&self, logical_name: &str) -> Option<&ResolvedImport> {
        self.styles.get(logical_name)
    }
}
