//! Bootstrap Runner
//!
//! Runs the startup sequence in strict order:
//!
//! 1. `<python> --version`; failure is fatal (`InterpreterMissing`)
//! 2. `<python> -c "import <module>"`; on failure run the installer once,
//!    and an installer failure is fatal (`DependencyInstallFailed`)
//! 3. `<python> <entry point>`; its exit code becomes the launcher's
//! 4. wait for a key press, on every path
//!
//! There are no retries. Each failure is reported once.

use crate::config::LauncherConfig;
use crate::diagnostics;
use crate::error::LauncherError;
use crate::pause::Pause;
use crate::step_runner::CommandRunner;
use crate::steps::{ImportProbe, InstallDependencies, InterpreterProbe, LaunchApplication};
use tracing::{debug, info, warn};

/// Exit code when the entry point cannot be started at all
const LAUNCH_FAILED_EXIT_CODE: i32 = 1;

/// How a bootstrap run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The application ran; its exit code is propagated unchanged.
    Launched { exit_code: i32 },
    /// The entry point could not be spawned.
    LaunchFailed,
    /// A guarded step failed before launch.
    Failed(LauncherError),
}

impl Outcome {
    /// Exit code the launcher process should finish with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Launched { exit_code } => *exit_code,
            Outcome::LaunchFailed => LAUNCH_FAILED_EXIT_CODE,
            Outcome::Failed(err) => err.exit_code(),
        }
    }
}

/// Sequential environment check and launch.
pub struct BootstrapRunner<R, P> {
    config: LauncherConfig,
    runner: R,
    pause: P,
}

impl<R: CommandRunner, P: Pause> BootstrapRunner<R, P> {
    pub fn new(config: LauncherConfig, runner: R, pause: P) -> Self {
        Self {
            config,
            runner,
            pause,
        }
    }

    /// Run steps 1-3, then always pause.
    pub fn run(&mut self) -> Outcome {
        let outcome = self.run_steps();

        if let Err(e) = self.pause.wait() {
            // Nothing left to show the user; the exit code still stands
            warn!("Final pause failed: {}", e);
        }

        info!("Launcher finished with exit code {}", outcome.exit_code());
        outcome
    }

    /// Hand back the seams, mainly so tests can inspect their records.
    pub fn into_parts(self) -> (R, P) {
        (self.runner, self.pause)
    }

    fn run_steps(&mut self) -> Outcome {
        // The banner is the one user-facing report; logs stay below the default filter
        if let Err(err) = self.check_interpreter() {
            debug!("{}", err);
            diagnostics::print_interpreter_missing(&self.config, &err);
            return Outcome::Failed(err);
        }

        if let Err(err) = self.ensure_dependencies() {
            debug!("{}", err);
            diagnostics::print_install_failed(&self.config, &err);
            return Outcome::Failed(err);
        }

        self.launch()
    }

    fn check_interpreter(&mut self) -> Result<(), LauncherError> {
        let probe = InterpreterProbe::from(&self.config);
        match self.runner.run(&probe) {
            Ok(output) if output.success => {
                debug!("Interpreter '{}' is available", self.config.interpreter);
                Ok(())
            }
            Ok(output) => Err(LauncherError::interpreter_missing(
                &self.config.interpreter,
                format!("'--version' exited with code {}", output.propagated_code()),
            )),
            Err(e) => Err(LauncherError::interpreter_missing(
                &self.config.interpreter,
                format!("{:#}", e),
            )),
        }
    }

    fn ensure_dependencies(&mut self) -> Result<(), LauncherError> {
        let probe = ImportProbe::from(&self.config);
        match self.runner.run(&probe) {
            Ok(output) if output.success => {
                debug!("Module {} is importable, skipping install", self.config.gui_module);
                return Ok(());
            }
            Ok(output) => info!(
                "Import of {} failed (exit code {}), installing dependencies",
                self.config.gui_module,
                output.propagated_code()
            ),
            Err(e) => info!("Import probe could not run: {:#}", e),
        }

        diagnostics::print_installing(&self.config);

        let install = InstallDependencies::from(&self.config);
        match self.runner.run(&install) {
            Ok(output) if output.success => {
                info!("Dependencies installed from {}", self.config.manifest.display());
                Ok(())
            }
            Ok(output) => Err(LauncherError::install_failed(
                &self.config.manifest,
                Some(output.propagated_code()),
            )),
            Err(e) => {
                info!("Installer could not run: {:#}", e);
                Err(LauncherError::install_failed(&self.config.manifest, None))
            }
        }
    }

    fn launch(&mut self) -> Outcome {
        diagnostics::print_starting();

        let launch = LaunchApplication::from(&self.config);
        match self.runner.run(&launch) {
            Ok(output) => Outcome::Launched {
                exit_code: output.propagated_code(),
            },
            Err(e) => {
                debug!("Failed to launch application: {:#}", e);
                diagnostics::print_launch_failed(&self.config, &e);
                Outcome::LaunchFailed
            }
        }
    }
}
