//! Child process lifecycle for the launcher
//!
//! The launched application shares the launcher's console and process
//! group, so Ctrl+C reaches it directly. The launcher ignores Ctrl+C itself
//! so that it survives to propagate the child's exit code and pause.
//!
//! When the launcher is told to go away (SIGTERM, or SIGHUP when the
//! terminal window closes), every registered child gets SIGTERM, then
//! SIGKILL after a grace period, before the launcher exits with
//! `128 + signal`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
#[cfg(unix)]
use std::time::Instant;

/// Global registry of child process IDs
static CHILD_REGISTRY: OnceLock<Arc<Mutex<ChildRegistry>>> = OnceLock::new();

/// Grace period between SIGTERM and SIGKILL on shutdown
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

/// Registry tracking spawned child processes
#[derive(Debug, Default)]
pub struct ChildRegistry {
    /// Set of child PIDs currently running
    pids: HashSet<u32>,
    /// Whether cleanup has already been initiated (prevent double-cleanup)
    cleanup_initiated: bool,
}

impl ChildRegistry {
    /// Get or create the global child registry
    pub fn global() -> Arc<Mutex<ChildRegistry>> {
        CHILD_REGISTRY
            .get_or_init(|| Arc::new(Mutex::new(ChildRegistry::default())))
            .clone()
    }

    /// Register a new child process
    pub fn register(&mut self, pid: u32) {
        self.pids.insert(pid);
        tracing::debug!("Registered child process PID {}", pid);
    }

    /// Unregister a child process (called when it exits normally)
    pub fn unregister(&mut self, pid: u32) {
        self.pids.remove(&pid);
        tracing::debug!("Unregistered child process PID {}", pid);
    }

    /// Get count of tracked children
    pub fn count(&self) -> usize {
        self.pids.len()
    }

    /// Terminate all tracked child processes
    /// Sends SIGTERM first, waits up to `grace_period`, then SIGKILL
    #[cfg(unix)]
    pub fn terminate_all(&mut self, grace_period: Duration) {
        if self.cleanup_initiated {
            tracing::debug!("Cleanup already initiated, skipping");
            return;
        }
        self.cleanup_initiated = true;

        if self.pids.is_empty() {
            tracing::debug!("No child processes to terminate");
            return;
        }

        tracing::info!("Terminating {} child process(es)...", self.pids.len());

        let pids_to_kill: Vec<u32> = self.pids.iter().copied().collect();
        for &pid in &pids_to_kill {
            if let Err(e) = send_signal(pid, Signal::SIGTERM) {
                tracing::warn!("Failed to send SIGTERM to PID {}: {}", pid, e);
            }
        }

        let start = Instant::now();
        while start.elapsed() < grace_period {
            if pids_to_kill.iter().all(|&pid| !is_process_alive(pid)) {
                tracing::info!("All child processes terminated gracefully");
                self.pids.clear();
                return;
            }
            std::thread::sleep(Duration::from_millis(100));
        }

        for &pid in &pids_to_kill {
            if is_process_alive(pid) {
                tracing::warn!("Process {} did not terminate, sending SIGKILL", pid);
                if let Err(e) = send_signal(pid, Signal::SIGKILL) {
                    tracing::error!("Failed to send SIGKILL to PID {}: {}", pid, e);
                }
            }
        }

        self.pids.clear();
        tracing::info!("Child process cleanup complete");
    }

    /// Console close on Windows tears down every attached process already.
    #[cfg(not(unix))]
    pub fn terminate_all(&mut self, _grace_period: Duration) {
        self.cleanup_initiated = true;
        self.pids.clear();
    }
}

#[cfg(unix)]
fn send_signal(pid: u32, signal: Signal) -> Result<(), nix::Error> {
    let raw = i32::try_from(pid).map_err(|_| nix::Error::EINVAL)?;
    signal::kill(Pid::from_raw(raw), signal)
}

/// Check if a process is still alive (not dead or zombie)
#[cfg(unix)]
fn is_process_alive(pid: u32) -> bool {
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    if signal::kill(Pid::from_raw(raw), None).is_err() {
        return false;
    }

    // Field 3 of /proc/pid/stat is the state; Z and X are not running
    if let Ok(stat) = std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        let fields: Vec<&str> = stat.split_whitespace().collect();
        if fields.len() > 2 {
            return !matches!(fields[2], "Z" | "X");
        }
    }

    true
}

/// Install the launcher's signal handling. Call once at program start.
pub fn init_signal_handlers() -> Result<(), std::io::Error> {
    // The child receives Ctrl+C from the terminal on its own
    ctrlc::set_handler(|| {
        tracing::info!("Ctrl+C received, waiting for the application to exit");
    })
    .map_err(std::io::Error::other)?;

    #[cfg(unix)]
    init_termination_handlers()?;

    Ok(())
}

#[cfg(unix)]
fn init_termination_handlers() -> Result<(), std::io::Error> {
    use signal_hook::consts::signal::{SIGHUP, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::thread;

    let mut signals = Signals::new([SIGTERM, SIGHUP])?;

    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let signal_name = match sig {
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => "UNKNOWN",
            };

            tracing::info!("Received {} signal, cleaning up...", signal_name);

            if let Ok(mut registry) = ChildRegistry::global().lock() {
                registry.terminate_all(SHUTDOWN_GRACE);
            }

            std::process::exit(128 + sig);
        }
    });

    Ok(())
}
