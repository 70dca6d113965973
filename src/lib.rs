//! Bundlemap - asset manifest resolver with content-hash cache busting
//!
//! Bundlemap translates a build-time list of logical entry points into the
//! concrete, cache-busted script and style URLs actually served, and keeps
//! that resolution cached until a deploy signal or a version change
//! invalidates it. It sits between a webpack-style bundler's output and a
//! page-rendering layer that must enqueue the right files with the right
//! versions, in development and production modes.

pub mod assets;
pub mod config;
pub mod enqueue;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod resolver;
pub mod store;

// Re-exports for convenience
pub use assets::{AssetMapping, ResolvedEntry, ResolvedImport};
pub use config::{Mode, ResolverConfig};
pub use enqueue::{EnqueuePolicy, EnqueuedScript, EnqueuedStyle};
pub use error::{BundlemapError, BundlemapResult};
pub use hash::ContentHash;
pub use manifest::{ManifestEntry, ManifestReader};
pub use resolver::AssetResolver;
pub use store::{AssetStore, JsonAssetStore};
