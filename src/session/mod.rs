//! Session-scoped mode state and activation control
//!
//! This module handles:
//! - Per-session mode state (active mode, warned tools)
//! - Activation lifecycle (activate, deactivate, toggle, list, current)
//! - The shared catalog snapshot the sessions resolve against

mod controller;
mod state;

pub use controller::{Activation, ActivationController, ModeSummary};
pub use state::ModeSessionState;
