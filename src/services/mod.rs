//! Services module - Pure logic for Hyprland config and wallpaper handling.
//!
//! The services have no dependency on the command line front-end. Each takes its
//! inputs (home directory, paths, settings values) explicitly, so tests can point
//! them at a temporary directory.
//!
//! # Components
//!
//! - [`paths`]: Home expansion, lexical path cleaning and the location of
//!   `hyprland.conf` / `hyprpaper.conf` ([`HyprPaths`]).
//! - [`SourceDirectiveParser`]: Extracts `source = <path>` directives from config text.
//! - [`glob`]: Expands wildcard source paths against the filesystem.
//! - [`ConfigGraphBuilder`]: Resolves the set of files reachable from the root config,
//!   either recursively or one level deep.
//! - [`FileRecordLoader`]: Loads [`ConfigFile`](crate::models::ConfigFile) snapshots
//!   and saves edits atomically.
//! - [`WallpaperRewriter`]: Rewrites `preload` / `wallpaper` lines in `hyprpaper.conf`
//!   and restarts the wallpaper daemon through a [`ServiceRestarter`].
//! - [`ImageDirectoryScanner`]: Finds wallpaper candidates and builds thumbnails.
//!
//! # Usage Example
//!
//! ```ignore
//! use hyprsettings::services::{ConfigGraphBuilder, HyprPaths};
//! use hyprsettings::models::ResolveMode;
//!
//! let paths = HyprPaths::for_home("/home/user");
//! let root = paths.locate_root()?;
//!
//! let graph = ConfigGraphBuilder::new(paths.home(), ResolveMode::Recursive).build(&root)?;
//! for file in graph.sourced_files() {
//!     println!("{file}");
//! }
//! ```

pub mod directives;
pub mod files;
pub mod glob;
pub mod graph;
pub mod images;
pub mod paths;
pub mod service_manager;
pub mod wallpaper;

pub use directives::{SourceDirective, SourceDirectiveParser};
pub use files::FileRecordLoader;
pub use graph::ConfigGraphBuilder;
pub use images::ImageDirectoryScanner;
pub use paths::HyprPaths;
pub use service_manager::{ServiceRestarter, SystemdUserService};
pub use wallpaper::{RewrittenConfig, WallpaperRewriter};
