// HyprSettings - Hyprland configuration and wallpaper management
//
// This is the library crate containing the config resolution, wallpaper and image logic.
// The binary crate (main.rs) provides the command line entry point.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use app::AppController;
pub use config::SettingsManager;
pub use error::HyprError;
pub use models::{
    AppSettings, ConfigFile, ConfigGraph, ImageFileDescriptor, ResolveMode, Thumbnail,
    WallpaperConfig, WallpaperUpdate,
};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
