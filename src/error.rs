//! Error types for bundlemap
//!
//! Uses `thiserror` for library errors. All resolution errors are fatal to
//! the current rebuild attempt only: a failed rebuild never touches the
//! previously stored asset mapping.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundlemap operations
pub type BundlemapResult<T> = Result<T, BundlemapError>;

/// Main error type for bundlemap operations
#[derive(Error, Debug)]
pub enum BundlemapError {
    /// Manifest file missing or not valid structured data
    #[error("manifest unreadable at {path}: {message}")]
    ManifestUnreadable { path: PathBuf, message: String },

    /// Generated script fragment missing or unreadable
    #[error("script fragment unreadable at {path}: {message}")]
    FragmentUnreadable { path: PathBuf, message: String },

    /// A bundle file referenced by a fragment does not exist on disk
    #[error("bundle file missing: {path}")]
    BundleFileMissing { path: PathBuf },

    /// The backing option store could not be read or written
    #[error("asset store unavailable: {0}")]
    StoreUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
