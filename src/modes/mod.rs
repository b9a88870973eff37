//! Mode definition loading
//!
//! Parses mode documents (markdown with YAML frontmatter) and discovers
//! them across precedence-ordered search paths:
//! - Project modes: `<project>/.agent/modes/*.md`
//! - User modes: `~/.agent/modes/*.md`
//! - Host-supplied extras (bundles), lowest precedence
//!
//! Priority: project > user > extras; first occurrence of a name wins.

mod discovery;
mod parser;

pub use discovery::{DiscoveryWarning, ModeCatalog, ModeDiscovery};
pub use parser::{parse_mode_document, parse_mode_file};
