use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// How far `source` directives are followed from the root config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Follow directives in every reachable file, guarding against cycles
    #[default]
    Recursive,

    /// Only directives written in the root config itself
    SingleLevel,
}

/// User settings from `settings.yaml`
///
/// Every field has a default, so a partial (or missing) file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Overrides `~/.config/hypr` when set
    pub hypr_dir: Option<Utf8PathBuf>,

    /// Directory scanned when no directory is given explicitly
    pub wallpaper_dir: String,

    /// User service restarted after `hyprpaper.conf` changes
    pub wallpaper_service: String,

    pub restart_timeout_secs: u64,

    /// Longest side of generated thumbnails, in pixels
    pub thumbnail_max_size: u32,

    pub thumbnail_jpeg_quality: u8,

    pub resolve_mode: ResolveMode,

    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hypr_dir: None,
            wallpaper_dir: "~/Pictures".to_string(),
            wallpaper_service: "hyprpaper".to_string(),
            restart_timeout_secs: 10,
            thumbnail_max_size: 1000,
            thumbnail_jpeg_quality: 75,
            resolve_mode: ResolveMode::Recursive,
            debug_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.wallpaper_service, "hyprpaper");
        assert_eq!(settings.thumbnail_max_size, 1000);
        assert_eq!(settings.thumbnail_jpeg_quality, 75);
        assert_eq!(settings.resolve_mode, ResolveMode::Recursive);
        assert!(settings.hypr_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: AppSettings =
            serde_yaml_ng::from_str("resolve_mode: single_level\nthumbnail_max_size: 300\n")
                .unwrap();
        assert_eq!(settings.resolve_mode, ResolveMode::SingleLevel);
        assert_eq!(settings.thumbnail_max_size, 300);
        assert_eq!(settings.wallpaper_service, "hyprpaper");
    }
}
