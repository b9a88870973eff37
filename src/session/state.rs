//! Per-session mode state
//!
//! Owned exclusively by one session. Tracks the active mode by name (never
//! by copy, so a redefinition takes effect on next use) and the tools that
//! have already been warned during the current activation.

use std::collections::HashSet;

/// Mutable mode state for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSessionState {
    /// Name of the active mode, if any
    active: Option<String>,

    /// Tools that already triggered a warn block this activation
    warned: HashSet<String>,
}

impl ModeSessionState {
    /// Create an empty state (no active mode, nothing warned)
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active mode, if any
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Check whether the given mode is the active one
    pub fn is_active(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    /// Set or clear the active mode
    ///
    /// `warned` is cleared exactly when the active value changes. Explicitly
    /// re-setting the mode that is already active preserves warn state.
    pub fn set_active(&mut self, name: Option<String>) {
        if self.active != name {
            self.warned.clear();
        }
        self.active = name;
    }

    /// Check whether a tool already triggered its warn block this activation
    pub fn has_warned(&self, tool_name: &str) -> bool {
        self.warned.contains(tool_name)
    }

    /// Record that a tool triggered its warn block
    pub fn record_warning(&mut self, tool_name: impl Into<String>) {
        self.warned.insert(tool_name.into());
    }

    /// Number of tools warned this activation
    pub fn warned_count(&self) -> usize {
        self.warned.len()
    }
}
