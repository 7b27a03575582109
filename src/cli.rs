use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Novelist AI launcher - checks Python, installs PyQt6 if needed, starts the app
#[derive(Parser)]
#[command(name = "novelist-launcher")]
#[command(about = "Checks for Python, installs the GUI dependency and starts Novelist AI")]
#[command(version)]
pub struct Cli {
    /// Load launcher settings from a JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Python interpreter command
    #[arg(long)]
    pub python: Option<String>,

    /// Module whose import decides whether dependencies get installed
    #[arg(long)]
    pub module: Option<String>,

    /// Dependency manifest passed to pip
    #[arg(long)]
    pub requirements: Option<PathBuf>,

    /// Application entry point script
    #[arg(long)]
    pub entry: Option<PathBuf>,

    /// Directory to run the interpreter in
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Where to write the configuration
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Field overrides given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            interpreter: self.python.clone(),
            gui_module: self.module.clone(),
            manifest: self.requirements.clone(),
            entry_point: self.entry.clone(),
            working_dir: self.workdir.clone(),
        }
    }

    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
