//! Agent mode engine
//!
//! Overlays a "mode" - a named bundle of behavioral guidance and
//! tool-access policy - onto an otherwise fixed agent runtime, without
//! touching the runtime's base configuration.
//!
//! ## Features
//!
//! - Mode discovery across precedence-ordered search paths
//! - Per-session activation with toggle and shortcut semantics
//! - Stateful tool moderation (safe / warn-once / confirm / block)
//! - Context injection of mode guidance per agent turn
//! - Non-blocking delegation of `confirm` tools to an external approver
//!
//! ## Mode documents
//!
//! Modes are markdown files with YAML frontmatter, discovered from
//! `<project>/.agent/modes/` and `~/.agent/modes/` (project wins):
//!
//! ```markdown
//! ---
//! mode:
//!   name: plan
//!   description: Think and discuss
//!   shortcut: p
//!   tools:
//!     safe: [read_file, grep]
//!     warn: [bash]
//!     confirm: [write_file]
//!   default_action: block
//! ---
//!
//! # Plan Mode
//!
//! Discuss the approach before making changes...
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use agent_modes::{ModeDiscovery, ModeEngine};
//!
//! # fn main() -> agent_modes::Result<()> {
//! let discovery = ModeDiscovery::with_default_paths(".");
//! let (engine, mut approval_requests) = ModeEngine::new(discovery)?;
//!
//! engine.handle_mode_command("session-1", "plan")?;
//!
//! // Once per turn:
//! if let Some(_context) = engine.on_prompt_submit("session-1") {
//!     // merge into the turn's input
//! }
//!
//! // Once per tool invocation attempt:
//! let _outcome = engine.on_pre_tool_call("session-1", "bash");
//! # Ok(())
//! # }
//! ```
//!
//! The host drains `approval_requests` and resolves each one through its
//! own approval UI; the engine never blocks on a human decision.

pub mod approval;
pub mod context;
pub mod engine;
pub mod modes;
pub mod policy;
pub mod session;
pub mod tools;
pub mod types;

pub use approval::{ApprovalBridge, ApprovalOutcome, ApprovalRequest, PendingApproval};
pub use context::render_context;
pub use engine::{ModeEngine, PolicyOutcome};
pub use modes::{DiscoveryWarning, ModeCatalog, ModeDiscovery, parse_mode_document};
pub use policy::decide;
pub use session::{Activation, ActivationController, ModeSessionState, ModeSummary};
pub use tools::{ModeTool, Tool, ToolContext, ToolResult};
pub use types::{Decision, ModeDefinition, ModeError, Result, ToolPolicy};
