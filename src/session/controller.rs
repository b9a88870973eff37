//! Mode activation control
//!
//! Implements activate / deactivate / toggle / list / current over a shared
//! catalog plus per-session state. The catalog is process-wide read-mostly
//! state, rebuilt atomically and swapped by reference; re-discovery runs on
//! demand before `activate` and `list`, and a failed refresh falls back to
//! the cached catalog (seconds-scale staleness is acceptable, mode files
//! change rarely).

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::modes::{ModeCatalog, ModeDiscovery};
use crate::session::ModeSessionState;
use crate::types::{ModeError, Result};

/// Display entry for one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSummary {
    /// Mode name
    pub name: String,
    /// Display string (may be empty)
    pub description: String,
}

/// Result of an activation-changing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Activation {
    /// A mode is now active
    Activated {
        /// The newly active mode
        mode: ModeSummary,
    },
    /// No mode is active
    Deactivated {
        /// Mode that was active before, if any
        previous: Option<String>,
    },
}

/// Controls mode activation against the live catalog
#[derive(Debug)]
pub struct ActivationController {
    discovery: ModeDiscovery,
    catalog: RwLock<Arc<ModeCatalog>>,
}

impl ActivationController {
    /// Create a controller, running an initial discovery pass
    pub fn new(discovery: ModeDiscovery) -> Result<Self> {
        let catalog = Arc::new(discovery.discover()?);
        Ok(Self {
            discovery,
            catalog: RwLock::new(catalog),
        })
    }

    /// The current catalog snapshot
    pub fn catalog(&self) -> Arc<ModeCatalog> {
        self.catalog.read().expect("catalog lock poisoned").clone()
    }

    /// Re-discover modes and swap in the fresh catalog
    pub fn refresh(&self) -> Result<Arc<ModeCatalog>> {
        let fresh = Arc::new(self.discovery.discover()?);
        *self.catalog.write().expect("catalog lock poisoned") = fresh.clone();
        Ok(fresh)
    }

    /// Refresh, keeping the cached catalog when re-discovery fails
    fn refreshed_catalog(&self) -> Arc<ModeCatalog> {
        match self.refresh() {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "Mode re-discovery failed, using cached catalog");
                self.catalog()
            }
        }
    }

    /// Resolve a command word to a canonical mode name (name, then shortcut)
    pub fn resolve_command(&self, word: &str) -> Option<String> {
        self.catalog().resolve(word).map(|def| def.name.clone())
    }

    /// Explicitly activate a mode
    ///
    /// Re-activating the already-active mode keeps its warn state; switching
    /// from another mode (or from none) clears it. Unknown names are an
    /// error with no state change.
    pub fn activate(&self, session: &mut ModeSessionState, name: &str) -> Result<Activation> {
        let catalog = self.refreshed_catalog();
        let Some(def) = catalog.get(name) else {
            return Err(ModeError::unknown_mode(name));
        };

        session.set_active(Some(def.name.clone()));
        tracing::info!(mode = %def.name, "Activated mode");

        Ok(Activation::Activated {
            mode: ModeSummary {
                name: def.name.clone(),
                description: def.description.clone(),
            },
        })
    }

    /// Deactivate the current mode
    ///
    /// Succeeds (as a no-op) when no mode is active.
    pub fn deactivate(&self, session: &mut ModeSessionState) -> Activation {
        let previous = session.active().map(String::from);
        session.set_active(None);
        if let Some(ref name) = previous {
            tracing::info!(mode = %name, "Deactivated mode");
        }
        Activation::Deactivated { previous }
    }

    /// Toggle a mode: deactivate when it is the active one, switch otherwise
    pub fn toggle(&self, session: &mut ModeSessionState, name: &str) -> Result<Activation> {
        if session.is_active(name) {
            Ok(self.deactivate(session))
        } else {
            self.activate(session, name)
        }
    }

    /// List all catalog entries, sorted by name
    ///
    /// Pure read, no session mutation.
    pub fn list(&self) -> Vec<ModeSummary> {
        self.refreshed_catalog()
            .list()
            .into_iter()
            .map(|(name, description)| ModeSummary { name, description })
            .collect()
    }

    /// The active mode's summary, or None when no mode is active
    pub fn current(&self, session: &ModeSessionState) -> Option<ModeSummary> {
        let name = session.active()?;
        let catalog = self.catalog();
        match catalog.get(name) {
            Some(def) => Some(ModeSummary {
                name: def.name.clone(),
                description: def.description.clone(),
            }),
            None => {
                tracing::warn!(mode = %name, "Active mode no longer in catalog");
                None
            }
        }
    }
}
