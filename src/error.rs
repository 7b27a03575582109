//! Error handling module for the launcher
//!
//! Provides centralized error types using thiserror. The two terminal
//! bootstrap failures (`InterpreterMissing`, `DependencyInstallFailed`) map
//! to exit code 1; `Json` and `Config` cover launcher configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the launcher
#[derive(Error, Debug)]
pub enum LauncherError {
    /// The interpreter could not be spawned or `--version` exited non-zero
    #[error("Python interpreter '{interpreter}' is not available: {reason}")]
    InterpreterMissing { interpreter: String, reason: String },

    /// The dependency installer could not be run or exited non-zero
    #[error("Failed to install dependencies from {}: {}", .manifest.display(), describe_exit(.exit_code))]
    DependencyInstallFailed {
        manifest: PathBuf,
        exit_code: Option<i32>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (reading, writing, validation)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;

fn describe_exit(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("installer exited with code {}", code),
        None => "installer could not be started or was terminated".to_string(),
    }
}

impl LauncherError {
    /// Create an interpreter-missing error
    pub fn interpreter_missing(interpreter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InterpreterMissing {
            interpreter: interpreter.into(),
            reason: reason.into(),
        }
    }

    /// Create a dependency-install error
    pub fn install_failed(manifest: impl Into<PathBuf>, exit_code: Option<i32>) -> Self {
        Self::DependencyInstallFailed {
            manifest: manifest.into(),
            exit_code,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Process exit code this error terminates the launcher with
    pub fn exit_code(&self) -> i32 {
        1
    }
}
