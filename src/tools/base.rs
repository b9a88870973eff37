//! Base tool trait definition

use async_trait::async_trait;
use serde::Serialize;

/// Invocation context handed to a tool by the host runtime
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Session the invocation belongs to
    pub session_id: String,
}

/// Structured result returned to the agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    /// Whether the action succeeded
    pub success: bool,
    /// Action-specific payload, or an error description
    pub data: serde_json::Value,
}

impl ToolResult {
    /// Create a success result with a payload
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Create a failure result with an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::json!({ "error": message.into() }),
        }
    }
}

/// Tool trait for host-registered tools
///
/// Tools implement this trait to provide functionality that can be
/// invoked by the agent.
#[async_trait]
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool description
    fn description(&self) -> &str;

    /// Get the JSON Schema for the tool's input parameters
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given input
    async fn execute(&self, input: serde_json::Value, context: &ToolContext) -> ToolResult;
}
