use crate::models::AppSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::fs;

/// Settings file name inside the settings directory
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Prefix for environment variable overrides (`HYPRSETTINGS_DEBUG_MODE=true`)
pub const ENV_PREFIX: &str = "HYPRSETTINGS";

/// Settings manager for loading and saving `settings.yaml`.
///
/// Effective settings are layered, later layers winning:
/// 1. [`AppSettings::default`]
/// 2. `settings.yaml` in the settings directory (optional)
/// 3. `HYPRSETTINGS_*` environment variables
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager for the specified directory.
    ///
    /// # Arguments
    /// * `settings_dir` - Directory containing `settings.yaml` (created if missing)
    pub fn new<P: AsRef<Utf8Path>>(settings_dir: P) -> Result<Self> {
        let settings_dir = settings_dir.as_ref().to_path_buf();

        if !settings_dir.exists() {
            fs::create_dir_all(&settings_dir).with_context(|| {
                format!("Failed to create settings directory: {}", settings_dir)
            })?;
        }

        Ok(Self {
            settings_path: settings_dir.join(SETTINGS_FILE_NAME),
            settings_dir,
        })
    }

    /// Platform settings directory, e.g. `~/.config/hyprsettings`.
    pub fn default_dir() -> Result<Utf8PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine the config directory")?;
        let config_dir = Utf8PathBuf::from_path_buf(config_dir)
            .map_err(|p| anyhow::anyhow!("Config directory is not valid UTF-8: {}", p.display()))?;
        Ok(config_dir.join(crate::APP_NAME))
    }

    /// Load the effective settings.
    ///
    /// # Returns
    /// The layered settings; defaults if the file doesn't exist
    pub fn load_settings(&self) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let defaults = serde_yaml_ng::to_string(&AppSettings::default())
            .context("Failed to serialize default settings")?;

        let settings: AppSettings = Config::builder()
            .add_source(File::from_str(&defaults, FileFormat::Yaml))
            .add_source(
                File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file.
    ///
    /// # Arguments
    /// * `settings` - The AppSettings to save
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the settings directory path.
    pub fn settings_dir(&self) -> &Utf8Path {
        &self.settings_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolveMode;
    use tempfile::TempDir;

    fn create_test_settings_manager() -> (SettingsManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = SettingsManager::new(&settings_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_create_settings_manager() {
        let (manager, _temp_dir) = create_test_settings_manager();
        assert!(manager.settings_path().ends_with(SETTINGS_FILE_NAME));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_settings_manager();
        let settings = manager.load_settings().unwrap();
        assert_eq!(settings.wallpaper_service, "hyprpaper");
        assert_eq!(settings.resolve_mode, ResolveMode::Recursive);
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_settings_manager();

        let mut settings = AppSettings::default();
        settings.thumbnail_max_size = 480;
        settings.resolve_mode = ResolveMode::SingleLevel;
        settings.hypr_dir = Some(Utf8PathBuf::from("~/dotfiles/hypr"));
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings().unwrap();
        assert_eq!(loaded.thumbnail_max_size, 480);
        assert_eq!(loaded.resolve_mode, ResolveMode::SingleLevel);
        assert_eq!(loaded.hypr_dir, Some(Utf8PathBuf::from("~/dotfiles/hypr")));
    }
}
