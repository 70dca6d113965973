//! Content Hash Value Object
//!
//! A validated, immutable fingerprint of a file's byte content. Used as the
//! cache-busting version token appended to asset URLs, not for integrity
//! verification.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash value object
///
/// Wraps a lowercase hex SHA-256 digest. Identical bytes always produce an
/// identical token, including for empty content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Compute the hash of raw byte content
    pub fn from_bytes(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        Self(format!("{:x}", digest))
    }

    /// The bare hex token used as a version string in URLs
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
