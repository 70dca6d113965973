//! Enqueue policy
//!
//! Thin glue between the cached mapping and the rendering layer. Each
//! logical name passes a boolean gate before anything is emitted; the gate
//! defaults to deny, so entries must be explicitly allowed. Named JSON
//! variables can be attached to a script entry for the current render pass
//! and are emitted once each, in the order they were first added.

use std::collections::HashMap;

use serde_json::Value;

use crate::assets::{AssetMapping, ResolvedImport};

/// One gated script entry ready for the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub struct EnqueuedScript {
    /// Render-layer handle, `<prefix><logical-name>`
    pub handle: String,
    /// Imports in load order; `version` is `None` in development mode
    pub imports: Vec<ResolvedImport>,
    /// Variables attached for this render pass, in add order
    pub vars: Vec<(String, Value)>,
}

/// One gated stylesheet ready for the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub struct EnqueuedStyle {
    pub handle: String,
    pub import: ResolvedImport,
}

/// Decides which entries are emitted and carries their render variables
#[derive(Debug, Clone, Default)]
pub struct EnqueuePolicy {
    handle_prefix: String,
    default_allow: bool,
    gates: HashMap<String, bool>,
    vars: HashMap<String, Vec<(String, Value)>>,
}

impl EnqueuePolicy {
    /// New policy with the given handle prefix; all entries denied by default
    pub fn new(handle_prefix: impl Into<String>) -> Self {
        Self {
            handle_prefix: handle_prefix.into(),
            ..Self::default()
        }
    }

    /// Flip the default gate to allow entries without an explicit override
    pub fn with_default_allow(mut self) -> Self {
        self.default_allow = true;
        self
    }

    /// Allow a logical name to be emitted
    pub fn allow(&mut self, logical_name: impl Into<String>) {
        self.gates.insert(logical_name.into(), true);
    }

    /// Deny a logical name regardless of the default
    pub fn deny(&mut self, logical_name: impl Into<String>) {
        self.gates.insert(logical_name.into(), false);
    }

    /// Whether the gate for a logical name is open
    pub fn emits(&self, logical_name: &str) -> bool {
        self.gates
            .get(logical_name)
            .copied()
            .unwrap_or(self.default_allow)
    }

    /// Attach a variable to a script entry for the current render pass
    ///
    /// Re-adding an existing name replaces its value in place.
    pub fn add_var(
        &mut self,
        logical_name: impl Into<String>,
        var_name: impl Into<String>,
        value: Value,
    ) {
        let vars = self.vars.entry(logical_name.into()).or_default();
        let var_name = var_name.into();
        match vars.iter_mut().find(|(name, _)| *name == var_name) {
            Some(slot) => slot.1 = value,
            None => vars.push((var_name, value)),
        }
    }

    /// Drop all attached variables at the end of a render pass
    pub fn clear_vars(&mut self) {
        self.vars.clear();
    }

    /// Gated script entries from the cached mapping
    pub fn emit_scripts(&self, mapping: &AssetMapping) -> Vec<EnqueuedScript> {
        mapping
            .scripts
            .iter()
            .filter(|(name, _)| self.emits(name))
            .map(|(name, entry)| EnqueuedScript {
                handle: format!("{}{}", self.handle_prefix, name),
                imports: entry.imports.clone(),
                vars: self.vars.get(name).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Gated stylesheets from the cached mapping
    pub fn emit_styles(&self, mapping: &AssetMapping) -> Vec<EnqueuedStyle> {
        mapping
            .styles
            .iter()
            .filter(|(name, _)| self.emits(name))
            .map(|(name, import)| EnqueuedStyle {
                handle: format!("{}{}", self.handle_prefix, name),
                import: import.clone(),
            })
            .collect()
    }
}
