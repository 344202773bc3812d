//! Path handling for Hyprland config files.
//!
//! [`resolve`] turns a raw path expression from a config file into a clean path:
//! `~` expansion, joining with the including file's directory, then lexical
//! cleaning. [`HyprPaths`] knows where the root config and the hyprpaper config live.
//!
//! Everything except [`HyprPaths::locate_root`] and [`home_dir`] is pure string work and
//! never touches the filesystem.

use crate::error::HyprError;
use crate::models::AppSettings;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

/// Directory holding Hyprland configs, relative to the home directory
pub const HYPR_CONFIG_SUBDIR: &str = ".config/hypr";

/// Root config file name
pub const ROOT_CONFIG_NAME: &str = "hyprland.conf";

/// Companion wallpaper-daemon config file name
pub const WALLPAPER_CONFIG_NAME: &str = "hyprpaper.conf";

/// Lexically normalize a path.
///
/// Collapses repeated separators, drops `.` segments, resolves `..` against the
/// preceding segment, and removes trailing separators. `..` directly under the root
/// is dropped; leading `..` segments of a relative path are kept. An empty path
/// becomes `.`.
///
/// ```ignore
/// assert_eq!(clean_path("/a/./b/../c/"), "/a/c");
/// ```
pub fn clean_path(path: impl AsRef<str>) -> Utf8PathBuf {
    let path = path.as_ref();
    if path.is_empty() {
        return Utf8PathBuf::from(".");
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if rooted {
        Utf8PathBuf::from(format!("/{joined}"))
    } else if joined.is_empty() {
        Utf8PathBuf::from(".")
    } else {
        Utf8PathBuf::from(joined)
    }
}

/// Replace a leading `~` (alone or followed by `/`) with `home`.
pub fn expand_home(raw: &str, home: &Utf8Path) -> String {
    if raw == "~" {
        home.to_string()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest).into_string()
    } else {
        raw.to_string()
    }
}

/// Resolve a raw path expression found in a file living in `base_dir`.
///
/// Paths written as `./x` or `../x` are only cleaned, not joined with `base_dir`, so
/// they stay relative to the process working directory. Hyprland users rarely write
/// them; the behavior matches what the config editor has always done.
pub fn resolve(raw: &str, base_dir: &Utf8Path, home: &Utf8Path) -> Utf8PathBuf {
    let expanded = expand_home(raw, home);

    let joined = if Utf8Path::new(&expanded).is_absolute()
        || expanded.starts_with("./")
        || expanded.starts_with("../")
    {
        expanded
    } else {
        base_dir.join(&expanded).into_string()
    };

    clean_path(joined)
}

/// Convert an OS path into a UTF-8 path.
pub fn utf8_path(path: PathBuf) -> Result<Utf8PathBuf, HyprError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| HyprError::NonUtf8Path { path })
}

/// The current user's home directory.
pub fn home_dir() -> Result<Utf8PathBuf, HyprError> {
    let home = dirs::home_dir().ok_or(HyprError::HomeDirUnavailable)?;
    utf8_path(home)
}

/// Locations of the files hyprsettings edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyprPaths {
    home: Utf8PathBuf,
    hypr_dir: Utf8PathBuf,
}

impl HyprPaths {
    pub fn new(home: impl Into<Utf8PathBuf>, hypr_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            home: home.into(),
            hypr_dir: hypr_dir.into(),
        }
    }

    /// Standard layout under `home`: `<home>/.config/hypr`.
    pub fn for_home(home: impl Into<Utf8PathBuf>) -> Self {
        let home = home.into();
        let hypr_dir = home.join(HYPR_CONFIG_SUBDIR);
        Self { home, hypr_dir }
    }

    /// Build paths from the platform home directory and the `hypr_dir` setting.
    pub fn discover(settings: &AppSettings) -> Result<Self, HyprError> {
        let home = home_dir()?;

        let paths = match &settings.hypr_dir {
            Some(dir) => {
                let hypr_dir = resolve(dir.as_str(), &home, &home);
                Self::new(home, hypr_dir)
            }
            None => Self::for_home(home),
        };

        tracing::debug!("HOME value: '{}', hypr dir: '{}'", paths.home, paths.hypr_dir);
        Ok(paths)
    }

    pub fn home(&self) -> &Utf8Path {
        &self.home
    }

    pub fn hypr_dir(&self) -> &Utf8Path {
        &self.hypr_dir
    }

    pub fn root_config(&self) -> Utf8PathBuf {
        self.hypr_dir.join(ROOT_CONFIG_NAME)
    }

    pub fn wallpaper_config(&self) -> Utf8PathBuf {
        self.hypr_dir.join(WALLPAPER_CONFIG_NAME)
    }

    /// The root config path, or [`HyprError::ConfigNotFound`] if it is not a file.
    pub fn locate_root(&self) -> Result<Utf8PathBuf, HyprError> {
        let root = self.root_config();
        if !root.is_file() {
            tracing::error!(
                "Hyprland config not found at {}. Nothing can be edited without it",
                root
            );
            return Err(HyprError::ConfigNotFound { path: root });
        }

        tracing::info!("Hyprland entry file found in {}", root);
        Ok(root)
    }
}
