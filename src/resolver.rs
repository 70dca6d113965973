//! Rebuild orchestration
//!
//! `AssetResolver` owns the rebuild lifecycle: it reads the manifest,
//! resolves every entry in manifest order and replaces the stored mapping
//! together with the current application version marker. Rendering reads
//! only the cached result; nothing is recomputed per request.
//!
//! Rebuilds run on three triggers:
//! - an explicit deploy signal (`deploy`)
//! - unconditionally at startup when `always_rebuild` is set (`startup`)
//! - lazily at request end when the stored marker is stale and auto-deploy
//!   is enabled (`finish_request`), at most once per process lifetime

use crate::assets::{AssetMapping, ResolvedEntry};
use crate::config::ResolverConfig;
use crate::error::BundlemapResult;
use crate::manifest::ManifestReader;
use crate::store::AssetStore;

/// Resolves the build manifest into served asset URLs and caches the result
pub struct AssetResolver<S: AssetStore> {
    config: ResolverConfig,
    store: S,
    deploy_ran: bool,
}

impl<S: AssetStore> AssetResolver<S> {
    pub fn new(config: ResolverConfig, store: S) -> Self {
        Self {
            config,
            store,
            deploy_ran: false,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Process start trigger: rebuild when `always_rebuild` is configured
    pub fn startup(&mut self) -> BundlemapResult<()> {
        if self.config.always_rebuild {
            self.deploy()?;
        }
        Ok(())
    }

    /// Explicit deploy signal: rebuild and atomically replace the store
    ///
    /// A failed rebuild leaves the previously stored mapping untouched.
    pub fn deploy(&mut self) -> BundlemapResult<AssetMapping> {
        // Counts as the one deploy of this lifecycle even when it fails;
        // a failed rebuild is re-invoked by the next explicit signal.
        self.deploy_ran = true;
        let mapping = self.rebuild()?;
        self.store.store(&mapping, &self.config.app_version)?;
        log::info!(
            "asset references rebuilt for version {}",
            self.config.app_version
        );
        Ok(mapping)
    }

    /// Request end trigger: lazy auto-deploy on a stale version marker
    ///
    /// Fires at most once per process lifetime regardless of how often the
    /// signal repeats within a request.
    pub fn finish_request(&mut self) -> BundlemapResult<()> {
        if !self.config.auto_deploy || self.deploy_ran {
            return Ok(());
        }
        let marker = self.store.version_marker()?;
        if marker.as_deref() != Some(self.config.app_version.as_str()) {
            self.deploy()?;
        }
        Ok(())
    }

    /// The cached mapping for rendering
    ///
    /// Degrades to an empty mapping when the store is unavailable so the
    /// render path emits nothing instead of failing.
    pub fn cached(&self) -> AssetMapping {
        match self.store.load() {
            Ok(mapping) => mapping,
            Err(e) => {
                log::warn!("asset store unavailable, emitting no assets: {}", e);
                AssetMapping::new()
            }
        }
    }

    fn rebuild(&self) -> BundlemapResult<AssetMapping> {
        let reader = ManifestReader::new(&self.config);
        let mut mapping = AssetMapping::new();

        for entry in reader.read_manifest()? {
            let imports = reader.resolve_entry(&entry)?;
            mapping
                .scripts
                .insert(entry.logical_name().to_string(), ResolvedEntry::new(imports));
        }

        for entry in reader.read_style_manifest()? {
            let import = reader.resolve_style(&entry)?;
            mapping
                .styles
                .insert(entry.logical_name().to_string(), import);
        }

        Ok(mapping)
    }
}
