//! Structural edits of `hyprpaper.conf`.
//!
//! hyprpaper's config has no grammar worth parsing in full, and users keep comments
//! and unrelated settings in it. Edits are therefore line based: each line is
//! classified by its leading keyword, `preload` and `wallpaper` lines are rewritten,
//! everything else is written back byte for byte.
//!
//! ```text
//! preload = /old/img.png            ->  preload = /new/img.png
//! wallpaper = DP-1, /old/img.png    ->  wallpaper = DP-1, /new/img.png
//! wallpaper = onlyonevalue          ->  (unchanged)
//! # keep me                         ->  (unchanged)
//! ```

use super::files::FileRecordLoader;
use super::service_manager::ServiceRestarter;
use crate::error::HyprError;
use crate::models::{WallpaperAssignment, WallpaperConfig, WallpaperUpdate};
use camino::Utf8Path;
use regex::Regex;

/// Result of [`WallpaperRewriter::rewrite`]: new file content plus what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenConfig {
    pub content: String,
    pub preloads_rewritten: usize,
    pub wallpapers_rewritten: usize,
    pub lines_passed_through: usize,
}

impl RewrittenConfig {
    fn into_update(self, config_path: &Utf8Path) -> WallpaperUpdate {
        WallpaperUpdate {
            config_path: config_path.to_path_buf(),
            preloads_rewritten: self.preloads_rewritten,
            wallpapers_rewritten: self.wallpapers_rewritten,
            lines_passed_through: self.lines_passed_through,
        }
    }
}

enum LineKind<'a> {
    Preload { path: &'a str },
    Wallpaper { monitor: &'a str, path: &'a str },
    MalformedWallpaper,
    Other,
}

/// Rewrites wallpaper declarations in hyprpaper configs.
///
/// # Fields
///
/// - `preload_pattern`: lines whose trimmed text starts with `preload`
/// - `wallpaper_pattern`: lines whose trimmed text starts with `wallpaper`
pub struct WallpaperRewriter {
    preload_pattern: Regex,
    wallpaper_pattern: Regex,
}

impl WallpaperRewriter {
    pub fn new() -> Self {
        Self {
            preload_pattern: Regex::new(r"^\s*preload").expect("Invalid preload regex"),
            wallpaper_pattern: Regex::new(r"^\s*wallpaper").expect("Invalid wallpaper regex"),
        }
    }

    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if self.preload_pattern.is_match(line) {
            return LineKind::Preload {
                path: declaration_value(line.trim(), "preload"),
            };
        }

        if self.wallpaper_pattern.is_match(line) {
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() != 2 {
                return LineKind::MalformedWallpaper;
            }
            return LineKind::Wallpaper {
                monitor: declaration_value(parts[0].trim(), "wallpaper"),
                path: parts[1].trim(),
            };
        }

        LineKind::Other
    }

    /// Point every `preload` and well-formed `wallpaper` line at `new_image`.
    ///
    /// Lines are split on `\n` and joined back with `\n`, so a trailing newline (or its
    /// absence) survives. Rewritten lines lose their indentation and any `\r`.
    pub fn rewrite(&self, content: &str, new_image: &str) -> RewrittenConfig {
        let mut preloads_rewritten = 0;
        let mut wallpapers_rewritten = 0;
        let mut lines_passed_through = 0;

        let lines: Vec<String> = content
            .split('\n')
            .map(|line| match self.classify(line) {
                LineKind::Preload { .. } => {
                    preloads_rewritten += 1;
                    format!("preload = {new_image}")
                }
                LineKind::Wallpaper { monitor, .. } => {
                    wallpapers_rewritten += 1;
                    format!("wallpaper = {monitor}, {new_image}")
                }
                LineKind::MalformedWallpaper => {
                    tracing::debug!("Leaving malformed wallpaper line untouched: {}", line);
                    lines_passed_through += 1;
                    line.to_string()
                }
                LineKind::Other => line.to_string(),
            })
            .collect();

        RewrittenConfig {
            content: lines.join("\n"),
            preloads_rewritten,
            wallpapers_rewritten,
            lines_passed_through,
        }
    }

    /// Current `preload` paths and monitor assignments, in file order.
    pub fn parse(&self, content: &str) -> WallpaperConfig {
        let mut config = WallpaperConfig::default();

        for line in content.lines() {
            match self.classify(line) {
                LineKind::Preload { path } => config.preloads.push(path.to_string()),
                LineKind::Wallpaper { monitor, path } => {
                    config.assignments.push(WallpaperAssignment {
                        monitor: monitor.to_string(),
                        path: path.to_string(),
                    });
                }
                LineKind::MalformedWallpaper | LineKind::Other => {}
            }
        }

        config
    }

    /// Rewrite `config_path` to use `new_image`, then restart `service`.
    ///
    /// # Errors
    ///
    /// - [`HyprError::NotFound`] / [`HyprError::Read`]: nothing was changed
    /// - [`HyprError::Write`] / [`HyprError::ReadOnly`]: nothing was changed, no restart
    /// - [`HyprError::ServiceRestart`]: the file **was** rewritten, the daemon still
    ///   shows the old wallpaper
    pub fn set_wallpaper(
        &self,
        config_path: &Utf8Path,
        new_image: &str,
        restarter: &dyn ServiceRestarter,
        service: &str,
    ) -> Result<WallpaperUpdate, HyprError> {
        let loader = FileRecordLoader::new();
        let current = loader.load(config_path)?;

        let rewritten = self.rewrite(&current.content, new_image);
        loader.save(config_path, &rewritten.content)?;

        let update = rewritten.into_update(config_path);
        tracing::info!(
            "Rewrote {}: {} preload, {} wallpaper lines ({} left untouched)",
            config_path,
            update.preloads_rewritten,
            update.wallpapers_rewritten,
            update.lines_passed_through
        );

        restarter.restart(service).inspect_err(|e| {
            tracing::error!("{} updated but {} was not restarted: {}", config_path, service, e);
        })?;

        tracing::info!("Restarted {}", service);
        Ok(update)
    }
}

impl Default for WallpaperRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Text after the first `=`, or after `keyword` when there is no `=`.
fn declaration_value<'a>(trimmed: &'a str, keyword: &str) -> &'a str {
    match trimmed.split_once('=') {
        Some((_, value)) => value.trim(),
        None => trimmed.strip_prefix(keyword).unwrap_or(trimmed).trim(),
    }
}
