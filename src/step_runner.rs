//! Step Execution
//!
//! `CommandRunner` is the seam between the bootstrap sequence and the
//! operating system. `SystemRunner` is the real implementation: it spawns
//! the step's command, registers the child for signal cleanup, blocks until
//! it exits and reports the exit status. Tests substitute a recording fake.

use crate::process_guard::ChildRegistry;
use crate::step_traits::{OutputMode, StepArgs};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

/// Exit code used when a child vanished without one and without a signal.
const UNKNOWN_EXIT_CODE: i32 = 1;

/// Executes bootstrap steps.
///
/// `Err` means the command could not be started at all (e.g. not found on
/// the search path). A started command that fails is `Ok` with
/// `success == false`.
pub trait CommandRunner {
    fn run(&mut self, step: &dyn StepArgs) -> Result<StepOutput>;
}

/// Outcome of a finished step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutput {
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Terminating signal, Unix only.
    pub signal: Option<i32>,
    /// Whether the step exited successfully (exit code 0).
    pub success: bool,
}

impl StepOutput {
    /// Build an output from a plain exit code.
    pub fn from_code(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            signal: None,
            success: code == 0,
        }
    }

    /// Build an output from a finished child's status.
    pub fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            exit_code: status.code(),
            signal,
            success: status.success(),
        }
    }

    /// Exit code the launcher should finish with when propagating this step.
    ///
    /// Signal deaths follow the shell convention of `128 + signal`.
    pub fn propagated_code(&self) -> i32 {
        match (self.exit_code, self.signal) {
            (Some(code), _) => code,
            (None, Some(sig)) => 128 + sig,
            (None, None) => UNKNOWN_EXIT_CODE,
        }
    }
}

/// Runs steps as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new(working_dir: Option<PathBuf>) -> Self {
        Self { working_dir }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, step: &dyn StepArgs) -> Result<StepOutput> {
        let program = step.program();
        let cli_args = step.to_cli_args();

        info!(
            "run step {}: {} args={:?}",
            step.step_name(),
            program,
            cli_args
        );

        let mut cmd = Command::new(program);
        cmd.args(&cli_args).stdin(Stdio::inherit());

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        match step.output_mode() {
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            OutputMode::Quiet => {
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to start '{}'", step.display_command()))?;
        let pid = child.id();

        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.register(pid);
        }

        let status = child.wait();

        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.unregister(pid);
        }

        let status = status.with_context(|| format!("Failed waiting for {}", step.step_name()))?;
        let output = StepOutput::from_status(status);

        if output.success {
            debug!("Step {} succeeded", step.step_name());
        } else {
            info!(
                "Step {} failed with exit code {}",
                step.step_name(),
                output.propagated_code()
            );
        }

        Ok(output)
    }
}
