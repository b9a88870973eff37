//! Host-registered tools
//!
//! The mode-control tool exposes activation to the agent as structured
//! data, next to the hook surface the host enforces.

mod base;
mod mode;

pub use base::{Tool, ToolContext, ToolResult};
pub use mode::ModeTool;
