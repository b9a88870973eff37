//! Mode definition data model
//!
//! A mode is a named bundle of behavioral guidance and tool-access policy,
//! loaded from a markdown document with YAML frontmatter and never mutated
//! after load. Re-discovery replaces whole definitions, it never patches
//! fields.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Moderation policy applied to a tool while a mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolPolicy {
    /// Always allow
    Safe,
    /// Block once with a warning, allow on retry within the same activation
    Warn,
    /// Delegate to the external approval collaborator
    Confirm,
    /// Always deny
    Block,
}

impl ToolPolicy {
    /// Get the lowercase name used in mode documents
    pub fn as_str(self) -> &'static str {
        match self {
            ToolPolicy::Safe => "safe",
            ToolPolicy::Warn => "warn",
            ToolPolicy::Confirm => "confirm",
            ToolPolicy::Block => "block",
        }
    }

    /// Parse a policy name as it appears in a mode document
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "safe" => Some(ToolPolicy::Safe),
            "warn" => Some(ToolPolicy::Warn),
            "confirm" => Some(ToolPolicy::Confirm),
            "block" => Some(ToolPolicy::Block),
            _ => None,
        }
    }
}

impl fmt::Display for ToolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed mode definition
///
/// Fully determined by its source document. The catalog key is `name`,
/// which is case-sensitive and doubles as the `/mode <name>` argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDefinition {
    /// Unique mode name
    pub name: String,

    /// Optional display string (empty when absent)
    #[serde(default)]
    pub description: String,

    /// Optional alias registered as an additional activation command
    #[serde(default)]
    pub shortcut: Option<String>,

    /// Per-tool moderation policy
    #[serde(default)]
    pub tool_policies: HashMap<String, ToolPolicy>,

    /// Policy applied to tools absent from `tool_policies`
    pub default_action: ToolPolicy,

    /// Markdown body, injected as context while the mode is active
    #[serde(default)]
    pub guidance: String,
}

impl ModeDefinition {
    /// Resolve the policy for a tool, falling back to `default_action`
    pub fn policy_for(&self, tool_name: &str) -> ToolPolicy {
        self.tool_policies
            .get(tool_name)
            .copied()
            .unwrap_or(self.default_action)
    }

    /// Collect the tools under one policy bucket, sorted by name
    pub fn tools_with_policy(&self, policy: ToolPolicy) -> Vec<String> {
        let mut tools: Vec<String> = self
            .tool_policies
            .iter()
            .filter(|(_, p)| **p == policy)
            .map(|(tool, _)| tool.clone())
            .collect();
        tools.sort();
        tools
    }
}
