//! Mode-control tool
//!
//! Lets the agent activate and deactivate modes itself. This bridges the
//! gap between the agent understanding mode commands and actually changing
//! the session's mode state for enforcement. The `activate` action is the
//! explicit path: unlike the plain `/mode <name>` command it never toggles.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::engine::ModeEngine;
use crate::session::Activation;
use crate::tools::base::{Tool, ToolContext, ToolResult};
use crate::types::ToolPolicy;

/// Action accepted by the mode tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ModeAction {
    Activate,
    Deactivate,
    List,
    Current,
}

#[derive(Debug, Deserialize)]
struct ModeToolInput {
    action: ModeAction,
    #[serde(default)]
    mode: Option<String>,
}

/// Tool for activating and deactivating modes
#[derive(Debug)]
pub struct ModeTool {
    engine: Arc<ModeEngine>,
}

impl ModeTool {
    /// Create the tool over a shared engine
    pub fn new(engine: Arc<ModeEngine>) -> Self {
        Self { engine }
    }

    fn activate(&self, session_id: &str, mode_name: &str) -> ToolResult {
        match self.engine.activate(session_id, mode_name) {
            Ok(Activation::Activated { mode }) => {
                let catalog = self.engine.controller().catalog();
                let policies = catalog.get(&mode.name).map(|def| {
                    json!({
                        "safe": def.tools_with_policy(ToolPolicy::Safe),
                        "warn": def.tools_with_policy(ToolPolicy::Warn),
                        "confirm": def.tools_with_policy(ToolPolicy::Confirm),
                        "block": def.tools_with_policy(ToolPolicy::Block),
                        "default": def.default_action.as_str(),
                    })
                });
                ToolResult::ok(json!({
                    "active_mode": mode.name,
                    "description": mode.description,
                    "message": format!("Mode '{}' activated. {}", mode.name, mode.description),
                    "tool_policies": policies,
                }))
            }
            Ok(Activation::Deactivated { .. }) => {
                // activate() never toggles; this arm is unreachable
                ToolResult::error("unexpected deactivation")
            }
            Err(e) => {
                let available: Vec<String> = self
                    .engine
                    .list()
                    .into_iter()
                    .map(|summary| summary.name)
                    .collect();
                ToolResult::error(format!(
                    "{e}. Available: {}",
                    available.join(", ")
                ))
            }
        }
    }

    fn deactivate(&self, session_id: &str) -> ToolResult {
        match self.engine.deactivate(session_id) {
            Activation::Deactivated {
                previous: Some(name),
            } => ToolResult::ok(json!({
                "previous_mode": name,
                "message": format!("Mode '{name}' deactivated."),
            })),
            _ => ToolResult::ok(json!({
                "previous_mode": null,
                "message": "No mode was active.",
            })),
        }
    }

    fn list(&self) -> ToolResult {
        let modes = self.engine.list();
        ToolResult::ok(json!({
            "count": modes.len(),
            "modes": modes,
        }))
    }

    fn current(&self, session_id: &str) -> ToolResult {
        match self.engine.current(session_id) {
            Some(mode) => ToolResult::ok(json!({
                "active_mode": mode.name,
                "description": mode.description,
                "message": format!("Current mode: {}", mode.name),
            })),
            None => ToolResult::ok(json!({
                "active_mode": null,
                "message": "No mode active",
            })),
        }
    }
}

#[async_trait]
impl Tool for ModeTool {
    fn name(&self) -> &str {
        "mode"
    }

    fn description(&self) -> &str {
        "Activate or deactivate a mode to change runtime behavior.\n\
         \n\
         Modes moderate which tools are allowed and inject guidance into\n\
         context. The user triggers modes with /mode <name>; call this tool\n\
         to actually change the mode state."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["activate", "deactivate", "list", "current"],
                    "description": "Action to perform",
                },
                "mode": {
                    "type": "string",
                    "description": "Mode name (required for the 'activate' action)",
                },
            },
            "required": ["action"],
        })
    }

    async fn execute(&self, input: serde_json::Value, context: &ToolContext) -> ToolResult {
        let input: ModeToolInput = match serde_json::from_value(input) {
            Ok(input) => input,
            Err(e) => return ToolResult::error(format!("Invalid mode tool input: {e}")),
        };

        match input.action {
            ModeAction::Current => self.current(&context.session_id),
            ModeAction::List => self.list(),
            ModeAction::Deactivate => self.deactivate(&context.session_id),
            ModeAction::Activate => match input.mode.as_deref() {
                Some(name) => self.activate(&context.session_id, name),
                None => ToolResult::error("Mode name required for activate action"),
            },
        }
    }
}
