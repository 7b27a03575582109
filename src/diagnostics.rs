//! User-facing console messages
//!
//! Guidance banners for the two terminal failures and the progress lines
//! printed between steps. These go straight to the console; diagnostic
//! logging goes through `tracing`.

use crate::config::LauncherConfig;
use crate::error::LauncherError;

const PYTHON_DOWNLOAD_URL: &str = "https://www.python.org/downloads/";

fn banner(title: &str) {
    eprintln!();
    eprintln!("╔══════════════════════════════════════════════════════════════════╗");
    eprintln!("║  {:<64}║", title);
    eprintln!("╚══════════════════════════════════════════════════════════════════╝");
    eprintln!();
}

/// Printed when the interpreter probe cannot run or fails.
pub fn print_interpreter_missing(config: &LauncherConfig, err: &LauncherError) {
    banner("Novelist AI - Python not found");
    eprintln!("❌ ERROR: {}", err);
    eprintln!();
    eprintln!("   Novelist AI needs Python 3 to run.");
    eprintln!("   Solution: install Python 3 from {}", PYTHON_DOWNLOAD_URL);
    eprintln!("   and make sure '{}' is on your PATH", config.interpreter);
    eprintln!("   (on Windows, tick \"Add python.exe to PATH\" in the installer).");
    eprintln!();
}

/// Printed when the dependency installer fails.
pub fn print_install_failed(config: &LauncherConfig, err: &LauncherError) {
    banner("Novelist AI - Dependency installation failed");
    eprintln!("❌ ERROR: {}", err);
    eprintln!();

    let manifest = config.resolve(&config.manifest);
    if !manifest.exists() {
        eprintln!("   The dependency list {:?} was not found.", manifest);
        eprintln!("   Run the launcher from the Novelist AI folder.");
    } else {
        eprintln!("   Solution: install the dependencies manually and try again:");
        eprintln!(
            "     {} -m pip install -r {}",
            config.interpreter,
            config.manifest.display()
        );
    }
    eprintln!();
}

/// Printed after a successful interpreter probe when the GUI module is missing.
pub fn print_installing(config: &LauncherConfig) {
    println!(
        "{} is not installed. Installing dependencies from {}...",
        config.gui_module,
        config.manifest.display()
    );
}

/// Printed right before the application starts.
pub fn print_starting() {
    println!("Starting Novelist AI...");
}

/// Printed when the entry point could not even be started.
pub fn print_launch_failed(config: &LauncherConfig, err: &anyhow::Error) {
    eprintln!("❌ ERROR: could not start {}: {:#}", config.entry_point.display(), err);
}
