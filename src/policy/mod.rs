//! Stateful tool-policy moderation
//!
//! Maps each tool invocation attempt to a [`crate::types::Decision`] under
//! the session's active mode, including the warn-once transition and the
//! hand-off of `confirm` tools to the approval bridge.

mod engine;

pub use engine::decide;
