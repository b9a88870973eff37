//! Mode discovery across precedence-ordered search paths
//!
//! Search paths are ordered highest precedence first (project-local, then
//! user-global, then host-supplied extras such as bundle directories). Each
//! directory is scanned non-recursively for `*.md` mode documents. A broken
//! file never aborts discovery; it is skipped and surfaced as a warning on
//! the resulting catalog.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::modes::parser;
use crate::types::{ModeDefinition, ModeError, Result};

/// Directory holding user and project configuration
const CONFIG_DIR: &str = ".agent";
/// Subdirectory holding mode documents
const MODES_DIR: &str = "modes";
/// Mode document extension
const MODE_FILE_EXT: &str = "md";

/// Non-fatal condition observed during a discovery pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryWarning {
    /// A mode file failed to parse and was skipped
    ParseFailure {
        path: PathBuf,
        message: String,
    },
    /// Two modes declared the same shortcut; the higher-precedence one kept it
    ShortcutCollision {
        shortcut: String,
        winner: String,
        loser: String,
    },
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryWarning::ParseFailure { path, message } => {
                write!(f, "Skipped mode file {}: {message}", path.display())
            }
            DiscoveryWarning::ShortcutCollision {
                shortcut,
                winner,
                loser,
            } => write!(
                f,
                "Shortcut '{shortcut}' is declared by both '{winner}' and '{loser}'; '{winner}' keeps it"
            ),
        }
    }
}

/// Name-keyed catalog of mode definitions, built fresh on each discovery pass
///
/// When the same name is found in multiple locations, the occurrence from
/// the highest-precedence location wins outright; there is no field-level
/// merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeCatalog {
    modes: HashMap<String, ModeDefinition>,
    shortcuts: HashMap<String, String>,
    warnings: Vec<DiscoveryWarning>,
}

impl ModeCatalog {
    /// Look up a mode by name
    pub fn get(&self, name: &str) -> Option<&ModeDefinition> {
        self.modes.get(name)
    }

    /// Check whether a mode name is present
    pub fn contains(&self, name: &str) -> bool {
        self.modes.contains_key(name)
    }

    /// Resolve a command word to a mode: by name first, then by shortcut
    pub fn resolve(&self, word: &str) -> Option<&ModeDefinition> {
        self.modes.get(word).or_else(|| {
            self.shortcuts
                .get(word)
                .and_then(|name| self.modes.get(name))
        })
    }

    /// All catalog entries as (name, description) pairs, sorted by name
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .modes
            .values()
            .map(|def| (def.name.clone(), def.description.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Shortcut -> mode name bindings
    pub fn shortcuts(&self) -> &HashMap<String, String> {
        &self.shortcuts
    }

    /// Warnings collected during the discovery pass
    pub fn warnings(&self) -> &[DiscoveryWarning] {
        &self.warnings
    }

    /// Number of modes in the catalog
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Check whether the catalog holds no modes
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    fn insert(&mut self, def: ModeDefinition) {
        if self.modes.contains_key(&def.name) {
            // Lower-precedence duplicate: documented contract, not an error
            tracing::debug!(mode = %def.name, "Dropping lower-precedence mode definition");
            return;
        }

        if let Some(shortcut) = def.shortcut.clone() {
            if let Some(winner) = self.shortcuts.get(&shortcut) {
                let warning = DiscoveryWarning::ShortcutCollision {
                    shortcut,
                    winner: winner.clone(),
                    loser: def.name.clone(),
                };
                tracing::warn!("{warning}");
                self.warnings.push(warning);
            } else {
                self.shortcuts.insert(shortcut, def.name.clone());
            }
        }

        self.modes.insert(def.name.clone(), def);
    }
}

/// Discovers mode definitions from an ordered list of directories
#[derive(Debug, Clone)]
pub struct ModeDiscovery {
    /// Highest precedence first
    search_paths: Vec<PathBuf>,
}

impl ModeDiscovery {
    /// Create a discovery over explicit search paths, highest precedence first
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Create a discovery over the default paths
    ///
    /// Project modes (`<project>/.agent/modes`) take precedence over user
    /// modes (`~/.agent/modes`).
    pub fn with_default_paths(project_dir: impl AsRef<Path>) -> Self {
        let mut search_paths = vec![project_dir.as_ref().join(CONFIG_DIR).join(MODES_DIR)];
        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(CONFIG_DIR).join(MODES_DIR));
        }
        Self { search_paths }
    }

    /// Append a search path at the lowest precedence (e.g., from a bundle)
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    /// The configured search paths, highest precedence first
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Build a fresh catalog from the current filesystem state
    ///
    /// Idempotent: an unchanged filesystem yields an equal catalog. Fails
    /// only when not a single search path could be read.
    pub fn discover(&self) -> Result<ModeCatalog> {
        let mut catalog = ModeCatalog::default();
        let mut readable_paths = 0usize;

        for dir in &self.search_paths {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::debug!(path = %dir.display(), error = %e, "Skipping unreadable search path");
                    continue;
                }
            };
            readable_paths += 1;

            // Sorted so precedence within a directory does not depend on
            // filesystem enumeration order
            let mut files: Vec<PathBuf> = entries
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file()
                        && path.extension().and_then(|ext| ext.to_str()) == Some(MODE_FILE_EXT)
                })
                .collect();
            files.sort();

            for path in files {
                match parser::parse_mode_file(&path) {
                    Ok(def) => catalog.insert(def),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse mode file");
                        catalog.warnings.push(DiscoveryWarning::ParseFailure {
                            path,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        if readable_paths == 0 {
            return Err(ModeError::CatalogUnavailable);
        }

        tracing::debug!(
            modes = catalog.len(),
            warnings = catalog.warnings.len(),
            "Mode discovery completed"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_mode(dir: &Path, file: &str, name: &str, description: &str) {
        let doc = format!(
            "---\nmode:\n  name: {name}\n  description: {description}\n---\n\nGuidance for {name}.\n"
        );
        std::fs::write(dir.join(file), doc).unwrap();
    }

    fn write_mode_with_shortcut(dir: &Path, file: &str, name: &str, shortcut: &str) {
        let doc = format!("---\nmode:\n  name: {name}\n  shortcut: {shortcut}\n---\n");
        std::fs::write(dir.join(file), doc).unwrap();
    }

    #[test]
    fn test_discover_single_directory() {
        let dir = TempDir::new().unwrap();
        write_mode(dir.path(), "plan.md", "plan", "Think and discuss");
        write_mode(dir.path(), "explore.md", "explore", "Look around");
        std::fs::write(dir.path().join("notes.txt"), "not a mode").unwrap();

        let catalog = ModeDiscovery::new(vec![dir.path().to_path_buf()])
            .discover()
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.list(),
            vec![
                ("explore".to_string(), "Look around".to_string()),
                ("plan".to_string(), "Think and discuss".to_string()),
            ]
        );
        assert!(catalog.warnings().is_empty());
    }

    #[test]
    fn test_precedence_earlier_path_wins() {
        let high = TempDir::new().unwrap();
        let low = TempDir::new().unwrap();
        write_mode(high.path(), "plan.md", "plan", "project plan");
        write_mode(low.path(), "plan.md", "plan", "user plan");
        write_mode(low.path(), "review.md", "review", "user review");

        let catalog =
            ModeDiscovery::new(vec![high.path().to_path_buf(), low.path().to_path_buf()])
                .discover()
                .unwrap();

        assert_eq!(catalog.get("plan").unwrap().description, "project plan");
        assert_eq!(catalog.get("review").unwrap().description, "user review");
        // Dropped duplicate is not a warning
        assert!(catalog.warnings().is_empty());
    }

    #[test]
    fn test_broken_file_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        write_mode(dir.path(), "plan.md", "plan", "ok");
        std::fs::write(dir.path().join("broken.md"), "no frontmatter here").unwrap();

        let catalog = ModeDiscovery::new(vec![dir.path().to_path_buf()])
            .discover()
            .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.warnings().len(), 1);
        assert!(matches!(
            &catalog.warnings()[0],
            DiscoveryWarning::ParseFailure { path, .. } if path.ends_with("broken.md")
        ));
    }

    #[test]
    fn test_shortcut_collision_warns_and_keeps_winner() {
        let dir = TempDir::new().unwrap();
        // Sorted filename order decides: a.md before b.md
        write_mode_with_shortcut(dir.path(), "a.md", "alpha", "x");
        write_mode_with_shortcut(dir.path(), "b.md", "beta", "x");

        let catalog = ModeDiscovery::new(vec![dir.path().to_path_buf()])
            .discover()
            .unwrap();

        assert_eq!(catalog.shortcuts().get("x"), Some(&"alpha".to_string()));
        assert_eq!(
            catalog.warnings(),
            &[DiscoveryWarning::ShortcutCollision {
                shortcut: "x".to_string(),
                winner: "alpha".to_string(),
                loser: "beta".to_string(),
            }]
        );
    }

    #[test]
    fn test_resolve_by_name_and_shortcut() {
        let dir = TempDir::new().unwrap();
        write_mode_with_shortcut(dir.path(), "plan.md", "plan", "p");

        let catalog = ModeDiscovery::new(vec![dir.path().to_path_buf()])
            .discover()
            .unwrap();

        assert_eq!(catalog.resolve("plan").unwrap().name, "plan");
        assert_eq!(catalog.resolve("p").unwrap().name, "plan");
        assert!(catalog.resolve("q").is_none());
    }

    #[test]
    fn test_all_paths_unreadable_is_hard_failure() {
        let discovery = ModeDiscovery::new(vec![PathBuf::from("/nonexistent/modes")]);
        assert!(matches!(
            discovery.discover(),
            Err(ModeError::CatalogUnavailable)
        ));

        let discovery = ModeDiscovery::new(Vec::new());
        assert!(matches!(
            discovery.discover(),
            Err(ModeError::CatalogUnavailable)
        ));
    }

    #[test]
    fn test_one_readable_path_is_enough() {
        let dir = TempDir::new().unwrap();
        write_mode(dir.path(), "plan.md", "plan", "ok");

        let catalog = ModeDiscovery::new(vec![
            PathBuf::from("/nonexistent/modes"),
            dir.path().to_path_buf(),
        ])
        .discover()
        .unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_discover_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_mode(dir.path(), "plan.md", "plan", "ok");
        std::fs::write(dir.path().join("broken.md"), "junk").unwrap();

        let discovery = ModeDiscovery::new(vec![dir.path().to_path_buf()]);
        let first = discovery.discover().unwrap();
        let second = discovery.discover().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_add_search_path_dedupes() {
        let dir = TempDir::new().unwrap();
        let mut discovery = ModeDiscovery::new(vec![dir.path().to_path_buf()]);
        discovery.add_search_path(dir.path().to_path_buf());
        assert_eq!(discovery.search_paths().len(), 1);

        discovery.add_search_path("/somewhere/else");
        assert_eq!(discovery.search_paths().len(), 2);
        // Appended at lowest precedence
        assert_eq!(discovery.search_paths()[0], dir.path());
    }

    #[test]
    fn test_default_paths_project_first() {
        let project = TempDir::new().unwrap();
        let discovery = ModeDiscovery::with_default_paths(project.path());
        assert_eq!(
            discovery.search_paths()[0],
            project.path().join(".agent").join("modes")
        );
    }

    #[test]
    fn test_non_recursive_scan() {
        let dir = TempDir::new().unwrap();
        write_mode(dir.path(), "plan.md", "plan", "ok");
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        write_mode(&nested, "hidden.md", "hidden", "should not load");

        let catalog = ModeDiscovery::new(vec![dir.path().to_path_buf()])
            .discover()
            .unwrap();

        assert!(catalog.contains("plan"));
        assert!(!catalog.contains("hidden"));
    }
}
