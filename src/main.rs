//! HyprSettings - Hyprland configuration and wallpaper management
//!
//! Main entry point for the command line application.
//!
//! # Execution Flow
//!
//! 1. Parse arguments (clap)
//! 2. Load layered settings from `<config dir>/hyprsettings/settings.yaml`
//!    and `HYPRSETTINGS_*` environment variables, then apply flag overrides
//! 3. Initialize logging → `<cache dir>/hyprsettings/logs/hyprsettings.<date>`
//! 4. Build the [`AppController`] and dispatch the subcommand
//!
//! Errors are printed with their full context chain and turn into a non-zero exit code.

use anyhow::Result;
use clap::Parser;
use hyprsettings::cli::{self, Cli, Command};
use hyprsettings::{APP_NAME, AppController, VERSION};
use std::io;

fn main() -> Result<()> {
    let args = Cli::parse();

    let manager = args.settings_manager()?;
    let mut settings = manager.load_settings()?;
    args.apply_overrides(&mut settings);

    // Keep the guard alive until exit so buffered log lines are flushed
    let log_dir = hyprsettings::logging::default_log_dir()?;
    let _guard = hyprsettings::logging::setup_logging(&log_dir, APP_NAME, settings.debug_mode, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match args.command {
        Command::Settings { action } => cli::execute_settings(action, &manager, &settings, &mut out),
        command => AppController::new(settings)
            .map_err(anyhow::Error::from)
            .and_then(|controller| cli::execute(command, &controller, &mut out)),
    };

    result.inspect_err(|e| tracing::error!("{:#}", e))
}
