//! Mode engine façade
//!
//! Wires discovery, activation, per-session state, policy decisions and the
//! approval bridge into the two hooks and the command path the host runtime
//! consumes. Session state lives in a concurrent map keyed by session id;
//! each entry is created empty on first use and dropped when the session
//! ends, at which point any approval still pending resolves as cancelled.

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::approval::{ApprovalBridge, ApprovalRequest, PendingApproval};
use crate::context;
use crate::modes::ModeDiscovery;
use crate::policy;
use crate::session::{Activation, ActivationController, ModeSessionState, ModeSummary};
use crate::types::{Decision, ModeError, Result};

/// Decision for one tool call, plus the approval handle when confirmation
/// is required
#[derive(Debug)]
pub struct PolicyOutcome {
    /// The moderation decision the host must enforce
    pub decision: Decision,
    /// Present only for `RequiresApproval`: resolves when the collaborator
    /// answers; the host must suspend the tool call on it
    pub approval: Option<PendingApproval>,
}

/// The mode engine a host runtime embeds
#[derive(Debug)]
pub struct ModeEngine {
    controller: ActivationController,
    sessions: DashMap<String, ModeSessionState>,
    approvals: ApprovalBridge,
}

impl ModeEngine {
    /// Create an engine, running an initial discovery pass
    ///
    /// Returns the engine plus the host-side stream of approval requests.
    pub fn new(
        discovery: ModeDiscovery,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ApprovalRequest>)> {
        let controller = ActivationController::new(discovery)?;
        let (approvals, requests) = ApprovalBridge::new();
        Ok((
            Self {
                controller,
                sessions: DashMap::new(),
                approvals,
            },
            requests,
        ))
    }

    /// The activation controller (catalog access, refresh)
    pub fn controller(&self) -> &ActivationController {
        &self.controller
    }

    /// Check whether a session has state recorded
    pub fn has_session(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Drop a session's state
    ///
    /// Approval handles the host still holds for this session resolve as
    /// cancelled when it discards them; the corresponding tool calls must
    /// be treated as denied.
    pub fn end_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            tracing::debug!(session_id = %session_id, "Ended mode session");
        }
        removed
    }

    // === Hook surface ===

    /// Prompt-submit hook: context to merge into the next agent turn
    ///
    /// Call once per turn; returns None when no mode is active.
    pub fn on_prompt_submit(&self, session_id: &str) -> Option<String> {
        let session = self.sessions.entry(session_id.to_string()).or_default();
        context::render_context(&session, &self.controller.catalog())
    }

    /// Pre-tool-call hook: moderate one tool invocation attempt
    ///
    /// The host must enforce the decision before executing the tool. For
    /// `RequiresApproval` the outcome carries the pending handle to suspend
    /// on; execution is permitted only on an approved outcome, exactly once.
    pub fn on_pre_tool_call(&self, session_id: &str, tool_name: &str) -> PolicyOutcome {
        let catalog = self.controller.catalog();
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        let decision = policy::decide(&mut session, &catalog, tool_name);
        drop(session);

        tracing::debug!(
            session_id = %session_id,
            tool = %tool_name,
            decision = ?decision,
            "Pre-tool-call decision"
        );

        let approval = match &decision {
            Decision::RequiresApproval { tool, mode } => {
                Some(self.approvals.request_approval(tool.clone(), mode.clone()))
            }
            _ => None,
        };

        PolicyOutcome { decision, approval }
    }

    // === Activation surface ===

    /// Explicitly activate a mode for a session (no toggle semantics)
    pub fn activate(&self, session_id: &str, name: &str) -> Result<Activation> {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        self.controller.activate(&mut session, name)
    }

    /// Deactivate the session's mode, if any
    pub fn deactivate(&self, session_id: &str) -> Activation {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        self.controller.deactivate(&mut session)
    }

    /// Toggle a mode for a session
    pub fn toggle(&self, session_id: &str, name: &str) -> Result<Activation> {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        self.controller.toggle(&mut session, name)
    }

    /// Handle a plain `/mode <word>` command
    ///
    /// The word may be a mode name or a declared shortcut. Plain commands
    /// carry toggle semantics: naming the already-active mode deactivates
    /// it.
    pub fn handle_mode_command(&self, session_id: &str, word: &str) -> Result<Activation> {
        let Some(name) = self.controller.resolve_command(word) else {
            return Err(ModeError::unknown_mode(word));
        };
        self.toggle(session_id, &name)
    }

    /// List all discovered modes
    pub fn list(&self) -> Vec<ModeSummary> {
        self.controller.list()
    }

    /// The session's active mode summary, or None
    pub fn current(&self, session_id: &str) -> Option<ModeSummary> {
        let session = self.sessions.entry(session_id.to_string()).or_default();
        self.controller.current(&session)
    }
}
