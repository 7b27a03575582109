//! Novelist AI Launcher Library
//!
//! Checks for a Python interpreter, installs the GUI dependency when it is
//! missing, starts the application and pauses so the console stays open.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pause;
pub mod process_guard;
pub mod step_runner;
pub mod step_traits;
pub mod steps;

// Re-export main types for convenience
pub use bootstrap::{BootstrapRunner, Outcome};
pub use config::{ConfigOverrides, LauncherConfig};
pub use error::LauncherError;
pub use pause::{ConsolePause, Pause};
pub use process_guard::ChildRegistry;
pub use step_runner::{CommandRunner, StepOutput, SystemRunner};
pub use step_traits::{OutputMode, StepArgs};
pub use steps::{ImportProbe, InstallDependencies, InterpreterProbe, LaunchApplication};
