//! Tool moderation decisions
//!
//! Returned from the pre-tool-call hook. The host must enforce the decision
//! before executing the tool: denials are user-visible tool results, not
//! errors, so each carries a reason the agent can read and react to.

use serde::{Deserialize, Serialize};

/// Outcome of a tool moderation check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Tool may execute
    Allow,

    /// Tool must not execute (terminal)
    Deny {
        /// Explanation for the agent
        reason: String,
    },

    /// Tool must not execute this time; a retry within the same activation
    /// will be allowed
    DeniedWithWarning {
        /// Explanation for the agent, including the retry hint
        reason: String,
    },

    /// Tool execution is suspended pending external approval
    RequiresApproval {
        /// Tool identifier to approve
        tool: String,
        /// Name of the active mode that requires confirmation
        mode: String,
    },
}

impl Decision {
    /// Check whether the tool may execute immediately
    ///
    /// `RequiresApproval` returns false here: execution is gated on the
    /// approval collaborator, not on this decision alone.
    pub fn allows_execution(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}
