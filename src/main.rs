//! Novelist AI Launcher - Main entry point
//!
//! With no arguments: check Python, install PyQt6 if needed, start
//! `main.py`, then wait for a key press.

use novelist_launcher::cli::{Cli, Commands};
use novelist_launcher::error::Result;
use novelist_launcher::{BootstrapRunner, ConsolePause, LauncherConfig, SystemRunner, process_guard};
use std::io::IsTerminal;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging; RUST_LOG overrides the verbosity flag
fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}

/// Defaults, then the optional config file, then CLI flags
fn load_config(cli: &Cli) -> Result<LauncherConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            LauncherConfig::load_from_file(path)?
        }
        None => LauncherConfig::default(),
    };

    config.apply_overrides(cli.overrides());
    config.validate()?;
    Ok(config)
}

fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.log_level());
    debug!("CLI arguments parsed");

    let code = match &cli.command {
        Some(Commands::Validate { config }) => validate_config(config),
        Some(Commands::InitConfig { path }) => init_config(path),
        None => run_bootstrap(&cli),
    };

    std::process::exit(code);
}

fn run_bootstrap(cli: &Cli) -> i32 {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            // Only reachable through explicit flags, so a console is already open to read this
            eprintln!("✗ {}", e);
            return 1;
        }
    };
    debug!("Effective configuration: {:?}", config);

    if let Err(e) = process_guard::init_signal_handlers() {
        // Children are still waited on; only signal forwarding is lost
        warn!("Failed to initialize signal handlers: {}", e);
    }

    let runner = SystemRunner::new(config.working_dir.clone());
    let mut bootstrap = BootstrapRunner::new(config, runner, ConsolePause);
    bootstrap.run().exit_code()
}

fn validate_config(path: &std::path::Path) -> i32 {
    info!("Validating configuration file: {:?}", path);
    let result = LauncherConfig::load_from_file(path).and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match result {
        Ok(config) => {
            println!("✓ Configuration file is valid: {:?}", config);
            0
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed: {}", e);
            1
        }
    }
}

fn init_config(path: &std::path::Path) -> i32 {
    match LauncherConfig::default().save_to_file(path) {
        Ok(()) => {
            println!("✓ Wrote default configuration to {:?}", path);
            0
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            1
        }
    }
}
