// App Controller - front-end facing operations
//
// Coordinates between:
// - AppSettings (user preferences)
// - HyprPaths (where hyprland.conf / hyprpaper.conf live)
// - ConfigGraphBuilder, FileRecordLoader (config editing)
// - WallpaperRewriter, ServiceRestarter (wallpaper switching)
// - ImageDirectoryScanner (wallpaper picker)
//
// Every call is independent: nothing resolved by one call is cached for the next.

use crate::error::HyprError;
use crate::models::{
    AppSettings, ConfigFile, ConfigGraph, ImageFileDescriptor, Thumbnail, WallpaperConfig,
    WallpaperUpdate,
};
use crate::services::files::FileRecordLoader;
use crate::services::graph::ConfigGraphBuilder;
use crate::services::images::{self, ImageDirectoryScanner};
use crate::services::paths::HyprPaths;
use crate::services::service_manager::{ServiceRestarter, SystemdUserService};
use crate::services::wallpaper::WallpaperRewriter;
use camino::{Utf8Path, Utf8PathBuf};
use std::time::Duration;

/// Single entry point for front-end operations.
///
/// # Example
/// ```ignore
/// let settings = SettingsManager::new(SettingsManager::default_dir()?)?.load_settings()?;
/// let controller = AppController::new(settings)?;
///
/// let graph = controller.resolve_config_graph()?;
/// for file in controller.get_core_files(&graph) {
///     println!("{} {}", file.permissions_string(), file.path);
/// }
/// ```
pub struct AppController {
    settings: AppSettings,
    paths: HyprPaths,
    graph_builder: ConfigGraphBuilder,
    loader: FileRecordLoader,
    rewriter: WallpaperRewriter,
    scanner: ImageDirectoryScanner,
    restarter: Box<dyn ServiceRestarter>,
}

impl AppController {
    /// Controller for the current user, restarting services through systemd.
    ///
    /// # Errors
    /// [`HyprError::HomeDirUnavailable`] if no home directory can be determined.
    pub fn new(settings: AppSettings) -> Result<Self, HyprError> {
        let paths = HyprPaths::discover(&settings)?;
        let restarter = SystemdUserService::new(Duration::from_secs(settings.restart_timeout_secs));
        Ok(Self::with_parts(settings, paths, Box::new(restarter)))
    }

    /// Controller with explicit paths and restarter.
    pub fn with_parts(
        settings: AppSettings,
        paths: HyprPaths,
        restarter: Box<dyn ServiceRestarter>,
    ) -> Self {
        tracing::debug!(
            "App controller for {} ({:?} resolution)",
            paths.hypr_dir(),
            settings.resolve_mode
        );

        Self {
            graph_builder: ConfigGraphBuilder::new(paths.home(), settings.resolve_mode),
            loader: FileRecordLoader::new(),
            rewriter: WallpaperRewriter::new(),
            scanner: ImageDirectoryScanner::new(paths.home()),
            settings,
            paths,
            restarter,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn paths(&self) -> &HyprPaths {
        &self.paths
    }

    /// Path of `hyprland.conf`, or [`HyprError::ConfigNotFound`].
    pub fn get_config_root(&self) -> Result<Utf8PathBuf, HyprError> {
        self.paths.locate_root()
    }

    /// Resolve the config graph from scratch.
    pub fn resolve_config_graph(&self) -> Result<ConfigGraph, HyprError> {
        let root = self.paths.locate_root()?;
        self.graph_builder.build(&root)
    }

    /// Files named by `source` directives, root excluded.
    pub fn get_sourced_files(&self) -> Result<Vec<Utf8PathBuf>, HyprError> {
        let root = self.paths.locate_root()?;
        self.graph_builder.build_sourced_file_set(&root)
    }

    /// Root config followed by every sourced file.
    pub fn get_all_config_files(&self) -> Result<Vec<Utf8PathBuf>, HyprError> {
        let root = self.paths.locate_root()?;
        self.graph_builder.build_full_file_set(&root)
    }

    /// Load one file for viewing or editing. Errors propagate.
    pub fn get_file_content(&self, path: &Utf8Path) -> Result<ConfigFile, HyprError> {
        self.loader.load(path).inspect_err(|e| {
            tracing::error!("Failed to open {}: {}", path, e);
        })
    }

    /// Write `content` to `path`. Errors propagate.
    pub fn save_file(&self, path: &Utf8Path, content: &str) -> Result<(), HyprError> {
        self.loader.save(path, content).inspect_err(|e| {
            tracing::error!("Failed to save {}: {}", path, e);
        })
    }

    /// Save a file and return the graph as it stands afterwards.
    ///
    /// The graph is always resolved again from its root: editing a member can add or
    /// drop `source` directives, and creating a file can make a `source` glob match.
    pub fn save_config_file(
        &self,
        graph: &ConfigGraph,
        path: &Utf8Path,
        content: &str,
    ) -> Result<ConfigGraph, HyprError> {
        self.save_file(path, content)?;

        let refreshed = self.graph_builder.build(graph.root())?;
        if refreshed != *graph {
            tracing::info!(
                "Config set changed after saving {}: {} -> {} sourced files",
                path,
                graph.sourced_count(),
                refreshed.sourced_count()
            );
        }
        Ok(refreshed)
    }

    /// Root, sourced files and `hyprpaper.conf` as loaded descriptors.
    ///
    /// Unreadable config files are listed as placeholders; a missing `hyprpaper.conf`
    /// is left out.
    pub fn get_core_files(&self, graph: &ConfigGraph) -> Vec<ConfigFile> {
        let mut files = self.loader.load_all(graph.all_files());

        let wallpaper_config = self.paths.wallpaper_config();
        if graph.contains(&wallpaper_config) {
            return files;
        }

        match self.loader.load(&wallpaper_config) {
            Ok(file) => files.push(file),
            Err(HyprError::NotFound { .. }) => {
                tracing::debug!("No {} present, not listing it", wallpaper_config);
            }
            Err(e) => {
                tracing::warn!("Error loading {}: {} (skipping)", wallpaper_config, e);
            }
        }

        files
    }

    /// `hyprpaper.conf` and its parsed declarations. A missing file is an error.
    pub fn get_wallpaper_config(&self) -> Result<(ConfigFile, WallpaperConfig), HyprError> {
        let file = self.loader.load(&self.paths.wallpaper_config())?;
        let parsed = self.rewriter.parse(&file.content);
        Ok((file, parsed))
    }

    /// Point hyprpaper at `image` and restart it.
    ///
    /// See [`WallpaperRewriter::set_wallpaper`] for how write and restart failures
    /// differ.
    pub fn set_wallpaper(&self, image: &str) -> Result<WallpaperUpdate, HyprError> {
        self.rewriter.set_wallpaper(
            &self.paths.wallpaper_config(),
            image,
            self.restarter.as_ref(),
            &self.settings.wallpaper_service,
        )
    }

    /// Images below `dir`, or below the `wallpaper_dir` setting when `None`.
    pub fn scan_image_directory(
        &self,
        dir: Option<&str>,
    ) -> Result<Vec<ImageFileDescriptor>, HyprError> {
        let dir = dir.unwrap_or(&self.settings.wallpaper_dir);
        self.scanner.scan(dir)
    }

    pub fn get_image_content(&self, path: &Utf8Path) -> Result<Vec<u8>, HyprError> {
        images::get_image_content(path)
    }

    /// Thumbnail sized and encoded per the thumbnail settings.
    pub fn get_image_thumbnail(&self, path: &Utf8Path) -> Result<Thumbnail, HyprError> {
        images::get_thumbnail(
            path,
            self.settings.thumbnail_max_size,
            self.settings.thumbnail_jpeg_quality,
        )
    }
}
