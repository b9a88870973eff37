//! Mode document parsing
//!
//! A mode is defined in a markdown file with YAML frontmatter. The
//! frontmatter carries a single recognized key, `mode`, and the markdown
//! body becomes the guidance injected while the mode is active:
//!
//! ```markdown
//! ---
//! mode:
//!   name: plan
//!   description: Think and discuss
//!   shortcut: plan
//!   tools:
//!     safe: [read_file, grep]
//!     warn: [bash]
//!   default_action: block
//! ---
//!
//! # Plan Mode
//!
//! This markdown content is injected when the mode is active...
//! ```
//!
//! Parsing is a pure transform: every validation failure maps to a distinct
//! [`ModeError`] kind so discovery can surface precise warnings.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{ModeDefinition, ModeError, Result, ToolPolicy};

/// Splits a document into frontmatter and body
static FRONTMATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?\z")
        .expect("Invalid frontmatter regex")
});

/// Raw frontmatter document shape
#[derive(Debug, Serialize, Deserialize)]
struct RawDocument {
    mode: Option<RawHeader>,
}

/// Raw `mode:` header as written in the document
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shortcut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tools: Option<RawToolLists>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_action: Option<String>,
}

/// Optional per-policy tool lists under `mode.tools`
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawToolLists {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    safe: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warn: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confirm: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block: Option<Vec<String>>,
}

/// Parse a mode definition from document text
pub fn parse_mode_document(content: &str) -> Result<ModeDefinition> {
    let captures = FRONTMATTER_RE
        .captures(content)
        .ok_or_else(|| ModeError::malformed_header("missing YAML frontmatter"))?;

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let raw: RawDocument = serde_yaml::from_str(yaml)
        .map_err(|e| ModeError::malformed_header(e.to_string()))?;
    let header = raw
        .mode
        .ok_or_else(|| ModeError::malformed_header("missing 'mode:' section"))?;

    let name = header
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ModeError::MissingName)?
        .to_string();

    let tool_policies = build_tool_policies(header.tools.as_ref().unwrap_or(&RawToolLists::default()))?;

    let default_action = match header.default_action {
        None => ToolPolicy::Block,
        Some(value) => {
            ToolPolicy::from_name(&value).ok_or(ModeError::InvalidDefaultAction(value))?
        }
    };

    Ok(ModeDefinition {
        name,
        description: header.description.unwrap_or_default(),
        shortcut: header.shortcut,
        tool_policies,
        default_action,
        guidance: body.trim().to_string(),
    })
}

/// Parse a mode definition from a file on disk
pub fn parse_mode_file(path: &Path) -> Result<ModeDefinition> {
    let content = std::fs::read_to_string(path)?;
    parse_mode_document(&content)
}

/// Turn the optional policy lists into one tool -> policy mapping
///
/// A tool listed in two different buckets is rejected outright rather than
/// resolved by list order. Repeats within one bucket are idempotent.
fn build_tool_policies(lists: &RawToolLists) -> Result<HashMap<String, ToolPolicy>> {
    let buckets = [
        (ToolPolicy::Safe, &lists.safe),
        (ToolPolicy::Warn, &lists.warn),
        (ToolPolicy::Confirm, &lists.confirm),
        (ToolPolicy::Block, &lists.block),
    ];

    let mut policies = HashMap::new();
    for (policy, tools) in buckets {
        let Some(tools) = tools else { continue };
        for tool in tools {
            if let Some(existing) = policies.insert(tool.clone(), policy) {
                if existing != policy {
                    return Err(ModeError::conflicting_policy(tool, existing, policy));
                }
            }
        }
    }
    Ok(policies)
}

impl ModeDefinition {
    /// Re-serialize this definition into a mode document
    ///
    /// Round-trips: parsing the output yields an equal definition. Tool
    /// lists are emitted sorted and empty lists are omitted.
    pub fn to_document(&self) -> String {
        let list_for = |policy: ToolPolicy| {
            let tools = self.tools_with_policy(policy);
            if tools.is_empty() { None } else { Some(tools) }
        };

        let tools = RawToolLists {
            safe: list_for(ToolPolicy::Safe),
            warn: list_for(ToolPolicy::Warn),
            confirm: list_for(ToolPolicy::Confirm),
            block: list_for(ToolPolicy::Block),
        };
        let has_tools = tools.safe.is_some()
            || tools.warn.is_some()
            || tools.confirm.is_some()
            || tools.block.is_some();

        let raw = RawDocument {
            mode: Some(RawHeader {
                name: Some(self.name.clone()),
                description: if self.description.is_empty() {
                    None
                } else {
                    Some(self.description.clone())
                },
                shortcut: self.shortcut.clone(),
                tools: has_tools.then_some(tools),
                default_action: Some(self.default_action.as_str().to_string()),
            }),
        };

        let yaml = serde_yaml::to_string(&raw).expect("mode header serializes");
        if self.guidance.is_empty() {
            format!("---\n{yaml}---\n")
        } else {
            format!("---\n{yaml}---\n\n{}\n", self.guidance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Built with concat! so the two-space YAML indent survives; a `\`
    // line-continuation would swallow it and un-nest the keys
    const PLAN_DOC: &str = concat!(
        "---\n",
        "mode:\n",
        "  name: plan\n",
        "  description: Think and discuss\n",
        "  shortcut: p\n",
        "  tools:\n",
        "    safe: [read_file, grep]\n",
        "    warn: [bash]\n",
        "  default_action: block\n",
        "---\n",
        "\n",
        "# Plan Mode\n",
        "\n",
        "Discuss before acting.\n",
    );

    #[test]
    fn test_parse_full_document() {
        let def = parse_mode_document(PLAN_DOC).unwrap();
        assert_eq!(def.name, "plan");
        assert_eq!(def.description, "Think and discuss");
        assert_eq!(def.shortcut, Some("p".to_string()));
        assert_eq!(def.policy_for("read_file"), ToolPolicy::Safe);
        assert_eq!(def.policy_for("grep"), ToolPolicy::Safe);
        assert_eq!(def.policy_for("bash"), ToolPolicy::Warn);
        assert_eq!(def.default_action, ToolPolicy::Block);
        assert_eq!(def.guidance, "# Plan Mode\n\nDiscuss before acting.");
    }

    #[test]
    fn test_parse_minimal_document() {
        let def = parse_mode_document("---\nmode:\n  name: explore\n---\n").unwrap();
        assert_eq!(def.name, "explore");
        assert_eq!(def.description, "");
        assert_eq!(def.shortcut, None);
        assert!(def.tool_policies.is_empty());
        assert_eq!(def.default_action, ToolPolicy::Block);
        assert_eq!(def.guidance, "");
    }

    #[test]
    fn test_missing_frontmatter() {
        let err = parse_mode_document("# Just markdown\n").unwrap_err();
        assert!(matches!(err, ModeError::MalformedHeader(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_mode_document("---\nmode: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, ModeError::MalformedHeader(_)));
    }

    #[test]
    fn test_missing_mode_section() {
        let err = parse_mode_document("---\nother: value\n---\n").unwrap_err();
        assert!(matches!(err, ModeError::MalformedHeader(_)));
    }

    #[test]
    fn test_missing_name() {
        let err = parse_mode_document("---\nmode:\n  description: x\n---\n").unwrap_err();
        assert!(matches!(err, ModeError::MissingName));
    }

    #[test]
    fn test_empty_name() {
        let err = parse_mode_document("---\nmode:\n  name: \"  \"\n---\n").unwrap_err();
        assert!(matches!(err, ModeError::MissingName));
    }

    #[test]
    fn test_conflicting_policy_rejected() {
        let doc = concat!(
            "---\n",
            "mode:\n",
            "  name: broken\n",
            "  tools:\n",
            "    safe: [bash]\n",
            "    block: [bash]\n",
            "---\n",
        );
        let err = parse_mode_document(doc).unwrap_err();
        match err {
            ModeError::ConflictingPolicy { tool, first, second } => {
                assert_eq!(tool, "bash");
                assert_eq!(first, ToolPolicy::Safe);
                assert_eq!(second, ToolPolicy::Block);
            }
            other => panic!("expected ConflictingPolicy, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_within_one_bucket_accepted() {
        let doc = concat!(
            "---\n",
            "mode:\n",
            "  name: lenient\n",
            "  tools:\n",
            "    safe: [grep, grep]\n",
            "---\n",
        );
        let def = parse_mode_document(doc).unwrap();
        assert_eq!(def.policy_for("grep"), ToolPolicy::Safe);
    }

    #[test]
    fn test_invalid_default_action() {
        let doc = "---\nmode:\n  name: odd\n  default_action: allow\n---\n";
        let err = parse_mode_document(doc).unwrap_err();
        match err {
            ModeError::InvalidDefaultAction(value) => assert_eq!(value, "allow"),
            other => panic!("expected InvalidDefaultAction, got {other:?}"),
        }
    }

    #[test]
    fn test_default_action_safe() {
        let doc = "---\nmode:\n  name: open\n  default_action: safe\n---\n";
        let def = parse_mode_document(doc).unwrap();
        assert_eq!(def.default_action, ToolPolicy::Safe);
        assert_eq!(def.policy_for("anything"), ToolPolicy::Safe);
    }

    #[test]
    fn test_body_trimmed_verbatim() {
        let doc = "---\nmode:\n  name: plan\n---\n\n\n  body text  \n\n";
        let def = parse_mode_document(doc).unwrap();
        assert_eq!(def.guidance, "body text");
    }

    #[test]
    fn test_fixture_keeps_nested_indentation() {
        // The keys must stay nested under `mode:` all the way through the
        // regex split and YAML decode
        assert!(PLAN_DOC.contains("mode:\n  name: plan"));
        let captures = FRONTMATTER_RE.captures(PLAN_DOC).unwrap();
        assert!(captures.get(1).unwrap().as_str().contains("  tools:"));

        let def = parse_mode_document(PLAN_DOC).unwrap();
        assert_eq!(def.name, "plan");
    }

    #[test]
    fn test_round_trip() {
        let def = parse_mode_document(PLAN_DOC).unwrap();
        let reparsed = parse_mode_document(&def.to_document()).unwrap();
        assert_eq!(reparsed, def);
    }

    #[test]
    fn test_round_trip_empty_guidance() {
        let def = parse_mode_document("---\nmode:\n  name: bare\n---\n").unwrap();
        let reparsed = parse_mode_document(&def.to_document()).unwrap();
        assert_eq!(reparsed, def);
    }

    #[test]
    fn test_parse_mode_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plan.md");
        std::fs::write(&path, PLAN_DOC).unwrap();

        let def = parse_mode_file(&path).unwrap();
        assert_eq!(def.name, "plan");

        let err = parse_mode_file(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, ModeError::Io(_)));
    }
}
