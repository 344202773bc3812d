//! Resolution of the set of files composing a Hyprland configuration.
//!
//! Starting from `hyprland.conf`, every `source` directive is resolved to concrete
//! paths (see [`paths::resolve`](super::paths::resolve) and [`glob::expand`]) and
//! collected into a [`ConfigGraph`].
//!
//! # Modes
//!
//! - [`ResolveMode::Recursive`] follows directives inside sourced files too, depth-first,
//!   so a file's own includes are listed right after it. Each file is parsed at most
//!   once, which also stops include cycles.
//! - [`ResolveMode::SingleLevel`] only looks at the root file's directives. Nested
//!   includes are listed if the root names them, but never opened.
//!
//! Sourced files that do not exist are kept in the graph without being parsed. The
//! caller decides whether that is worth showing; it is not an error here.

use super::directives::SourceDirectiveParser;
use super::glob;
use super::paths::{clean_path, resolve};
use crate::error::HyprError;
use crate::models::{ConfigGraph, ResolveMode};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs;
use std::io;

/// Builds [`ConfigGraph`]s from a root config file.
pub struct ConfigGraphBuilder {
    home: Utf8PathBuf,
    mode: ResolveMode,
    parser: SourceDirectiveParser,
}

impl ConfigGraphBuilder {
    /// # Arguments
    /// * `home` - Directory substituted for a leading `~`
    /// * `mode` - How far to follow `source` directives
    pub fn new(home: impl Into<Utf8PathBuf>, mode: ResolveMode) -> Self {
        Self {
            home: home.into(),
            mode,
            parser: SourceDirectiveParser::new(),
        }
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Resolve the graph rooted at `root`.
    ///
    /// # Errors
    ///
    /// [`HyprError::ConfigNotFound`] if `root` does not exist, or a read error if it
    /// cannot be read. Problems with sourced files are logged, never returned.
    pub fn build(&self, root: &Utf8Path) -> Result<ConfigGraph, HyprError> {
        let root = clean_path(root.as_str());
        let content = fs::read_to_string(&root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => HyprError::ConfigNotFound { path: root.clone() },
            _ => HyprError::from_read(root.clone(), e),
        })?;

        let mut graph = ConfigGraph::new(root.clone(), self.mode);
        let mut visited = HashSet::from([root.clone()]);
        self.visit(&root, &content, &mut graph, &mut visited);

        tracing::info!(
            "Resolved {} sourced files from {} ({:?})",
            graph.sourced_count(),
            root,
            self.mode
        );
        Ok(graph)
    }

    /// Sourced files only, root excluded.
    pub fn build_sourced_file_set(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, HyprError> {
        let graph = self.build(root)?;
        Ok(graph.sourced_files().map(Utf8Path::to_path_buf).collect())
    }

    /// Root followed by every sourced file.
    pub fn build_full_file_set(&self, root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, HyprError> {
        let graph = self.build(root)?;
        Ok(graph.all_files().map(Utf8Path::to_path_buf).collect())
    }

    /// Concrete paths named by the directives in `content`, for a file in `base_dir`.
    ///
    /// Order follows the text; duplicates are not removed.
    pub fn resolve_directives(&self, content: &str, base_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
        self.parser
            .extract(content)
            .flat_map(|directive| {
                let resolved = resolve(directive.raw, base_dir, &self.home);
                tracing::debug!(
                    "source on line {}: {} -> {}",
                    directive.line,
                    directive.raw,
                    resolved
                );
                glob::expand(resolved.as_str())
            })
            .collect()
    }

    fn visit(
        &self,
        file: &Utf8Path,
        content: &str,
        graph: &mut ConfigGraph,
        visited: &mut HashSet<Utf8PathBuf>,
    ) {
        let base_dir = file.parent().unwrap_or(Utf8Path::new("/"));

        for path in self.resolve_directives(content, base_dir) {
            graph.insert(path.clone());

            if self.mode == ResolveMode::SingleLevel || !visited.insert(path.clone()) {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(nested) => self.visit(&path, &nested, graph, visited),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("Sourced file {} does not exist", path);
                }
                Err(e) => {
                    tracing::warn!("Could not read sourced file {}: {} (skipping)", path, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_hypr_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        fs::create_dir_all(home.join(".config/hypr")).unwrap();
        (temp_dir, home)
    }

    #[test]
    fn test_missing_root_is_config_not_found() {
        let (_temp_dir, home) = create_hypr_dir();
        let builder = ConfigGraphBuilder::new(&home, ResolveMode::Recursive);

        let err = builder
            .build(&home.join(".config/hypr/hyprland.conf"))
            .unwrap_err();
        assert!(matches!(err, HyprError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_resolve_directives_relative_and_home() {
        let (_temp_dir, home) = create_hypr_dir();
        let builder = ConfigGraphBuilder::new(&home, ResolveMode::SingleLevel);
        let base = home.join(".config/hypr");

        let paths = builder.resolve_directives("source = sub/y.conf\nsource = ~/x.conf\n", &base);
        assert_eq!(paths, vec![base.join("sub/y.conf"), home.join("x.conf")]);
    }

    #[test]
    fn test_root_sourcing_itself_is_ignored() {
        let (_temp_dir, home) = create_hypr_dir();
        let root = home.join(".config/hypr/hyprland.conf");
        fs::write(&root, "source = hyprland.conf\nsource = a.conf\n").unwrap();

        let builder = ConfigGraphBuilder::new(&home, ResolveMode::Recursive);
        let sourced = builder.build_sourced_file_set(&root).unwrap();
        assert_eq!(sourced, vec![home.join(".config/hypr/a.conf")]);
    }

    #[test]
    fn test_full_file_set_starts_with_root() {
        let (_temp_dir, home) = create_hypr_dir();
        let root = home.join(".config/hypr/hyprland.conf");
        fs::write(&root, "source = a.conf\n").unwrap();

        let builder = ConfigGraphBuilder::new(&home, ResolveMode::SingleLevel);
        let all = builder.build_full_file_set(&root).unwrap();
        assert_eq!(all, vec![root.clone(), home.join(".config/hypr/a.conf")]);
    }
}
