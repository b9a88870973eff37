//! Mode guidance injection
//!
//! Renders the active mode's guidance for the prompt-submit hook, wrapped
//! in a provenance marker so the consuming runtime can tag where the text
//! came from. Pure function of current state; guidance is immutable per
//! definition, so no caching across turns is needed.

use crate::modes::ModeCatalog;
use crate::session::ModeSessionState;

/// Render the context block to inject for the next agent turn
///
/// Returns None when no mode is active, when the active mode has vanished
/// from the catalog, or when the mode has no guidance to inject.
pub fn render_context(session: &ModeSessionState, catalog: &ModeCatalog) -> Option<String> {
    let name = session.active()?;
    let Some(mode) = catalog.get(name) else {
        tracing::warn!(mode = %name, "Active mode not in catalog, skipping context injection");
        return None;
    };

    if mode.guidance.is_empty() {
        return None;
    }

    Some(format!(
        "<system-reminder source=\"mode-{}\">\n{}\n</system-reminder>",
        mode.name, mode.guidance
    ))
}
