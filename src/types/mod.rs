//! Public types for the mode engine
//!
//! This module contains all the shared types used across the crate.

mod decision;
mod error;
mod mode;

pub use decision::Decision;
pub use error::{ModeError, Result};
pub use mode::{ModeDefinition, ToolPolicy};
