//! Data models for hyprsettings.
//!
//! - [`ConfigFile`]: snapshot of one file taking part in the Hyprland configuration
//! - [`ConfigGraph`]: ordered, deduplicated set of files reachable from `hyprland.conf`
//! - [`ImageFileDescriptor`]: a wallpaper candidate found by a directory scan
//! - [`WallpaperConfig`] / [`WallpaperUpdate`]: read and write views of `hyprpaper.conf`
//! - [`AppSettings`]: user preferences loaded by [`SettingsManager`](crate::config::SettingsManager)
//!
//! All of these are plain values. Nothing here is cached process-wide; callers hold
//! the [`ConfigGraph`] they resolved and re-resolve when they need a fresh one.

pub mod config_file;
pub mod image;
pub mod settings;
pub mod wallpaper;

pub use config_file::{ConfigFile, ConfigGraph};
pub use image::{ImageFileDescriptor, Thumbnail, ThumbnailFormat};
pub use settings::{AppSettings, ResolveMode};
pub use wallpaper::{WallpaperAssignment, WallpaperConfig, WallpaperUpdate};
