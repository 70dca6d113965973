//! Versioned asset store
//!
//! Persists the resolved mapping together with the build version marker it
//! was produced under. The two values are replaced as one atomic pair: a
//! reader must never observe a marker from one rebuild next to a mapping
//! from another.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::assets::AssetMapping;
use crate::error::{BundlemapError, BundlemapResult};

/// Abstract persistence for the resolved asset mapping
///
/// The backing facility must be durable across process restarts with
/// last-write-wins semantics. Failures surface as
/// [`BundlemapError::StoreUnavailable`].
pub trait AssetStore {
    /// Load the stored mapping; empty if nothing was ever built
    fn load(&self) -> BundlemapResult<AssetMapping>;

    /// Atomically replace the mapping and its version marker
    fn store(&self, mapping: &AssetMapping, version_marker: &str) -> BundlemapResult<()>;

    /// The marker of the last stored rebuild, if any
    fn version_marker(&self) -> BundlemapResult<Option<String>>;
}

/// On-disk document holding the marker/mapping pair
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    version_marker: String,
    mapping: AssetMapping,
}

/// JSON file backed store
///
/// Both values live in a single document written via temp-file-then-rename,
/// which makes each `store()` call atomic on the backing filesystem.
pub struct JsonAssetStore {
    path: PathBuf,
}

impl JsonAssetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> BundlemapResult<Option<StoredDocument>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BundlemapError::StoreUnavailable(e.to_string())),
        };
        let document = serde_json::from_str(&content)
            .map_err(|e| BundlemapError::StoreUnavailable(e.to_string()))?;
        Ok(Some(document))
    }
}

impl AssetStore for JsonAssetStore {
    fn load(&self) -> BundlemapResult<AssetMapping> {
        Ok(self
            .read_document()?
            .map(|doc| doc.mapping)
            .unwrap_or_default())
    }

    fn store(&self, mapping: &AssetMapping, version_marker: &str) -> BundlemapResult<()> {
        let document = StoredDocument {
            version_marker: version_marker.to_string(),
            mapping: mapping.clone(),
        };
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| BundlemapError::StoreUnavailable(e.to_string()))?;
        write_atomic(&self.path, &content)
            .map_err(|e| BundlemapError::StoreUnavailable(e.to_string()))
    }

    fn version_marker(&self) -> BundlemapResult<Option<String>> {
        Ok(self.read_document()?.map(|doc| doc.version_marker))
    }
}

/// Write content to a file atomically via tempfile + rename
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
