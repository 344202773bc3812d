use camino::Utf8PathBuf;
use serde::Serialize;

/// One `wallpaper = MONITOR, PATH` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallpaperAssignment {
    /// Monitor name; empty means "every monitor" to hyprpaper
    pub monitor: String,
    pub path: String,
}

/// Read-only view of the declarations in `hyprpaper.conf`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WallpaperConfig {
    pub preloads: Vec<String>,
    pub assignments: Vec<WallpaperAssignment>,
}

impl WallpaperConfig {
    /// Path assigned to `monitor`, falling back to the catch-all assignment.
    pub fn wallpaper_for(&self, monitor: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.monitor == monitor)
            .or_else(|| self.assignments.iter().find(|a| a.monitor.is_empty()))
            .map(|a| a.path.as_str())
    }
}

/// Outcome of rewriting `hyprpaper.conf`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WallpaperUpdate {
    pub config_path: Utf8PathBuf,
    pub preloads_rewritten: usize,
    pub wallpapers_rewritten: usize,

    /// `wallpaper` lines left untouched because they were not `MONITOR, PATH` shaped
    pub lines_passed_through: usize,
}

impl WallpaperUpdate {
    pub fn has_changes(&self) -> bool {
        self.preloads_rewritten > 0 || self.wallpapers_rewritten > 0
    }
}
