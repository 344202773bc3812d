// Command line front-end
//
// Argument definitions (clap derive) and the dispatch from subcommands to
// AppController operations. Output goes to the writer passed in so commands can be
// exercised against a buffer.

use crate::app::AppController;
use crate::config::SettingsManager;
use crate::error::HyprError;
use crate::models::{AppSettings, ConfigFile, ResolveMode};
use crate::services::paths;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueHint};
use std::fs;
use std::io::{self, Read, Write};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "hyprsettings",
    version = crate::VERSION,
    about = "Inspect and edit Hyprland config files, switch hyprpaper wallpapers"
)]
pub struct Cli {
    /// Verbose logging (overrides the debug_mode setting)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only follow source directives found in hyprland.conf itself
    #[arg(long, global = true)]
    pub single_level: bool,

    /// Directory holding settings.yaml
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub settings_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the path of hyprland.conf
    Root,

    /// List files pulled in by source directives
    Sources {
        /// Include hyprland.conf itself
        #[arg(long)]
        all: bool,
    },

    /// Print a config file
    Show {
        #[arg(value_hint = ValueHint::FilePath)]
        path: String,

        /// Print the file descriptor instead of the content
        #[arg(long)]
        meta: bool,
    },

    /// Replace a config file with new content (stdin unless --from is given)
    Save {
        #[arg(value_hint = ValueHint::FilePath)]
        path: String,

        #[arg(long, value_hint = ValueHint::FilePath)]
        from: Option<Utf8PathBuf>,
    },

    /// List hyprland.conf, its sourced files and hyprpaper.conf
    CoreFiles,

    /// Inspect or change the hyprpaper wallpaper
    Wallpaper {
        #[command(subcommand)]
        action: WallpaperAction,
    },

    /// List wallpaper candidates below a directory
    Scan {
        /// Directory to scan (defaults to the wallpaper_dir setting)
        dir: Option<String>,

        /// Print the result as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Copy an image's bytes to a file
    Image {
        #[arg(value_hint = ValueHint::FilePath)]
        path: String,

        #[arg(long, value_hint = ValueHint::FilePath)]
        out: Utf8PathBuf,
    },

    /// Write a thumbnail of an image to a file
    Thumbnail {
        #[arg(value_hint = ValueHint::FilePath)]
        path: String,

        #[arg(long, value_hint = ValueHint::FilePath)]
        out: Utf8PathBuf,
    },

    /// Show or initialize settings.yaml
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum WallpaperAction {
    /// Print the preload and wallpaper declarations
    Show,

    /// Point every declaration at IMAGE and restart the daemon
    Set {
        #[arg(value_hint = ValueHint::FilePath)]
        image: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the effective settings
    Show,

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings.yaml
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Settings manager for `--settings-dir`, or the platform default.
    pub fn settings_manager(&self) -> Result<SettingsManager> {
        let dir = match &self.settings_dir {
            Some(dir) => dir.clone(),
            None => SettingsManager::default_dir()?,
        };
        SettingsManager::new(dir)
    }

    /// Apply command line overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut AppSettings) {
        if self.debug {
            settings.debug_mode = true;
        }
        if self.single_level {
            settings.resolve_mode = ResolveMode::SingleLevel;
        }
    }
}

/// Run a subcommand that operates on the Hyprland config.
///
/// `settings` commands are handled by [`execute_settings`]; they need no home
/// directory or controller.
pub fn execute(command: Command, controller: &AppController, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Root => {
            let root = controller.get_config_root()?;
            writeln!(out, "{}", root)?;
        }
        Command::Sources { all } => {
            let files = if all {
                controller.get_all_config_files()?
            } else {
                controller.get_sourced_files()?
            };
            for file in files {
                writeln!(out, "{}", file)?;
            }
        }
        Command::Show { path, meta } => {
            let path = user_path(controller, &path)?;
            let file = controller.get_file_content(&path)?;
            if meta {
                write_descriptor(out, &file)?;
            } else {
                out.write_all(file.content.as_bytes())?;
            }
        }
        Command::Save { path, from } => {
            let path = user_path(controller, &path)?;
            let content = match from {
                Some(source) => fs::read_to_string(&source)
                    .with_context(|| format!("Failed to read {}", source))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read new content from stdin")?;
                    buf
                }
            };
            save(controller, &path, &content, out)?;
        }
        Command::CoreFiles => {
            let graph = controller.resolve_config_graph()?;
            for file in controller.get_core_files(&graph) {
                if file.loaded {
                    writeln!(
                        out,
                        "{} {:>8} {}",
                        file.permissions_string(),
                        file.size,
                        file.path
                    )?;
                } else {
                    writeln!(out, "{:<9} {:>8} {}", "?", "-", file.path)?;
                }
            }
        }
        Command::Wallpaper { action } => match action {
            WallpaperAction::Show => {
                let (file, config) = controller.get_wallpaper_config()?;
                writeln!(out, "# {}", file.path)?;
                for preload in &config.preloads {
                    writeln!(out, "preload {}", preload)?;
                }
                for assignment in &config.assignments {
                    let monitor = if assignment.monitor.is_empty() {
                        "*"
                    } else {
                        assignment.monitor.as_str()
                    };
                    writeln!(out, "wallpaper {} {}", monitor, assignment.path)?;
                }
            }
            WallpaperAction::Set { image } => {
                let image = user_path(controller, &image)?;
                let update = controller.set_wallpaper(image.as_str())?;
                if !update.has_changes() {
                    tracing::warn!(
                        "{} has no preload or wallpaper lines, nothing was replaced",
                        update.config_path
                    );
                }
                writeln!(
                    out,
                    "{}: {} preload, {} wallpaper lines now use {}",
                    update.config_path, update.preloads_rewritten, update.wallpapers_rewritten, image
                )?;
            }
        },
        Command::Scan { dir, yaml } => {
            let images = controller.scan_image_directory(dir.as_deref())?;
            if yaml {
                let text =
                    serde_yaml_ng::to_string(&images).context("Failed to serialize scan result")?;
                out.write_all(text.as_bytes())?;
            } else {
                for image in &images {
                    writeln!(out, "{:>10} {:<10} {}", image.size, image.mime_type, image.path)?;
                }
            }
        }
        Command::Image { path, out: target } => {
            let path = user_path(controller, &path)?;
            let bytes = controller.get_image_content(&path)?;
            fs::write(&target, &bytes).with_context(|| format!("Failed to write {}", target))?;
            writeln!(out, "{} bytes written to {}", bytes.len(), target)?;
        }
        Command::Thumbnail { path, out: target } => {
            let path = user_path(controller, &path)?;
            let thumbnail = controller.get_image_thumbnail(&path)?;
            fs::write(&target, &thumbnail.bytes)
                .with_context(|| format!("Failed to write {}", target))?;
            writeln!(
                out,
                "{}x{} {} written to {}",
                thumbnail.width,
                thumbnail.height,
                thumbnail.format.mime_type(),
                target
            )?;
        }
        Command::Settings { .. } => {
            anyhow::bail!("settings commands are handled without a controller");
        }
    }

    Ok(())
}

/// Run a `settings` subcommand.
pub fn execute_settings(
    action: SettingsAction,
    manager: &SettingsManager,
    settings: &AppSettings,
    out: &mut dyn Write,
) -> Result<()> {
    match action {
        SettingsAction::Show => {
            writeln!(out, "# {}", manager.settings_path())?;
            let text = serde_yaml_ng::to_string(settings).context("Failed to serialize settings")?;
            out.write_all(text.as_bytes())?;
        }
        SettingsAction::Init { force } => {
            if manager.settings_path().exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    manager.settings_path()
                );
            }
            manager.save_settings(&AppSettings::default())?;
            writeln!(out, "Wrote {}", manager.settings_path())?;
        }
    }
    Ok(())
}

/// Save `content` and report whether the set of config files changed.
///
/// Without a `hyprland.conf` there is no graph to refresh and the file is simply
/// written.
fn save(
    controller: &AppController,
    path: &Utf8Path,
    content: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let graph = match controller.resolve_config_graph() {
        Ok(graph) => graph,
        Err(HyprError::ConfigNotFound { .. }) => {
            controller.save_file(path, content)?;
            writeln!(out, "Saved {}", path)?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let refreshed = controller.save_config_file(&graph, path, content)?;
    writeln!(out, "Saved {}", path)?;
    if refreshed != graph {
        writeln!(
            out,
            "Config files changed: {} -> {} sourced",
            graph.sourced_count(),
            refreshed.sourced_count()
        )?;
    }
    Ok(())
}

fn write_descriptor(out: &mut dyn Write, file: &ConfigFile) -> Result<()> {
    writeln!(out, "path: {}", file.path)?;
    writeln!(out, "name: {}", file.name)?;
    writeln!(out, "size: {}", file.size)?;
    writeln!(
        out,
        "permissions: {:o} ({})",
        file.permissions,
        file.permissions_string()
    )?;
    Ok(())
}

/// Turn a path typed on the command line into an absolute, cleaned path.
fn user_path(controller: &AppController, raw: &str) -> Result<Utf8PathBuf> {
    let expanded = paths::expand_home(raw, controller.paths().home());
    if Utf8Path::new(&expanded).is_absolute() {
        return Ok(paths::clean_path(expanded));
    }

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let cwd = paths::utf8_path(cwd)?;
    Ok(paths::clean_path(cwd.join(expanded)))
}
