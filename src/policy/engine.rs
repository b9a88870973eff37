//! Tool policy decisions
//!
//! Computes the moderation decision for one tool invocation attempt against
//! the session's active mode. Pure except for the single documented
//! mutation: the first `warn` hit for a tool records it in the session so
//! the next call within the same activation is allowed.

use crate::modes::ModeCatalog;
use crate::session::ModeSessionState;
use crate::types::{Decision, ModeDefinition, ToolPolicy};

/// Decide whether a tool may execute under the session's active mode
///
/// No active mode means no restriction. An active mode that has vanished
/// from the catalog since activation fails open: the session is reset to
/// inactive and the in-flight call is allowed rather than failed.
pub fn decide(
    session: &mut ModeSessionState,
    catalog: &ModeCatalog,
    tool_name: &str,
) -> Decision {
    let Some(active) = session.active() else {
        return Decision::Allow;
    };

    let Some(mode) = catalog.get(active) else {
        // Stale active mode: deleted between activation and use
        tracing::warn!(
            mode = %active,
            "Active mode vanished from catalog, treating session as inactive"
        );
        session.set_active(None);
        return Decision::Allow;
    };
    let mode = mode.clone();

    let policy = mode.policy_for(tool_name);
    let explicit = mode.tool_policies.contains_key(tool_name);
    tracing::debug!(
        mode = %mode.name,
        tool = %tool_name,
        policy = %policy,
        explicit,
        "Resolved tool policy"
    );

    match policy {
        ToolPolicy::Safe => Decision::Allow,

        ToolPolicy::Block => Decision::Deny {
            reason: block_reason(&mode, tool_name, explicit),
        },

        ToolPolicy::Warn => {
            if session.has_warned(tool_name) {
                Decision::Allow
            } else {
                session.record_warning(tool_name);
                tracing::info!(mode = %mode.name, tool = %tool_name, "First warn hit, blocking once");
                Decision::DeniedWithWarning {
                    reason: format!(
                        "Mode '{}': '{}' is blocked once as a warning. \
                         Call it again if it is appropriate for {} mode.",
                        mode.name, tool_name, mode.name
                    ),
                }
            }
        }

        ToolPolicy::Confirm => Decision::RequiresApproval {
            tool: tool_name.to_string(),
            mode: mode.name.clone(),
        },
    }
}

fn block_reason(mode: &ModeDefinition, tool_name: &str, explicit: bool) -> String {
    if explicit {
        let mut reason = format!("Mode '{}': '{}' is blocked.", mode.name, tool_name);
        if !mode.description.is_empty() {
            reason.push(' ');
            reason.push_str(&mode.description);
        }
        reason
    } else {
        format!(
            "Mode '{}': '{}' is not in the allowed list. Deactivate {} mode to use it.",
            mode.name, tool_name, mode.name
        )
    }
}
