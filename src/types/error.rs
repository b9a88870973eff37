//! Error types for the mode engine

use thiserror::Error;

use super::mode::ToolPolicy;

/// Main error type for the mode engine
#[derive(Debug, Error)]
pub enum ModeError {
    // === Parse errors (non-fatal to discovery) ===
    /// Mode document frontmatter is missing or not valid YAML
    #[error("Malformed mode header: {0}")]
    MalformedHeader(String),

    /// `mode.name` is missing or empty
    #[error("Mode name is missing or empty")]
    MissingName,

    /// The same tool appears in two different policy buckets
    #[error("Tool '{tool}' is listed under both '{first}' and '{second}' policies")]
    ConflictingPolicy {
        tool: String,
        first: ToolPolicy,
        second: ToolPolicy,
    },

    /// `default_action` is not one of safe/warn/confirm/block
    #[error("Invalid default_action '{0}', expected one of: safe, warn, confirm, block")]
    InvalidDefaultAction(String),

    // === Activation errors ===
    /// Mode name not present in the catalog
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    // === Discovery errors ===
    /// None of the configured search paths could be read
    #[error("No mode search path is available")]
    CatalogUnavailable,

    // === External errors ===
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the mode engine
pub type Result<T> = std::result::Result<T, ModeError>;

impl ModeError {
    /// Check if this error was produced while parsing a mode document
    ///
    /// Discovery downgrades these to warnings instead of aborting.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ModeError::MalformedHeader(_)
                | ModeError::MissingName
                | ModeError::ConflictingPolicy { .. }
                | ModeError::InvalidDefaultAction(_)
        )
    }

    // === Constructor helpers ===

    /// Create a malformed header error
    pub fn malformed_header(msg: impl Into<String>) -> Self {
        ModeError::MalformedHeader(msg.into())
    }

    /// Create a conflicting policy error
    pub fn conflicting_policy(
        tool: impl Into<String>,
        first: ToolPolicy,
        second: ToolPolicy,
    ) -> Self {
        ModeError::ConflictingPolicy {
            tool: tool.into(),
            first,
            second,
        }
    }

    /// Create an invalid default action error
    pub fn invalid_default_action(value: impl Into<String>) -> Self {
        ModeError::InvalidDefaultAction(value.into())
    }

    /// Create an unknown mode error
    pub fn unknown_mode(name: impl Into<String>) -> Self {
        ModeError::UnknownMode(name.into())
    }
}
