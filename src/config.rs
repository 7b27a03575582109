//! Launcher configuration: which interpreter, module, manifest and entry
//! point to use.
//!
//! Defaults reproduce the plain double-click behavior. A JSON file can
//! replace any field, and CLI flags override both.

use crate::error::{LauncherError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Interpreter command resolved through the search path by default
#[cfg(windows)]
pub const DEFAULT_INTERPRETER: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_INTERPRETER: &str = "python3";

/// GUI library whose importability decides whether to install dependencies
pub const DEFAULT_GUI_MODULE: &str = "PyQt6";
/// Dependency manifest handed to the installer
pub const DEFAULT_MANIFEST: &str = "requirements.txt";
/// Application entry point script
pub const DEFAULT_ENTRY_POINT: &str = "main.py";

/// Launcher configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub interpreter: String,
    pub gui_module: String,
    pub manifest: PathBuf,
    pub entry_point: PathBuf,
    /// Directory the child processes run in; current directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            gui_module: DEFAULT_GUI_MODULE.to_string(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            entry_point: PathBuf::from(DEFAULT_ENTRY_POINT),
            working_dir: None,
        }
    }
}

/// Per-field overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub interpreter: Option<String>,
    pub gui_module: Option<String>,
    pub manifest: Option<PathBuf>,
    pub entry_point: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LauncherConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&path, json).map_err(|e| {
            LauncherError::config(format!(
                "Failed to write configuration to {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            LauncherError::config(format!(
                "Failed to read configuration from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Apply CLI overrides; any value given on the command line wins
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(interpreter) = overrides.interpreter {
            self.interpreter = interpreter;
        }
        if let Some(module) = overrides.gui_module {
            self.gui_module = module;
        }
        if let Some(manifest) = overrides.manifest {
            self.manifest = manifest;
        }
        if let Some(entry) = overrides.entry_point {
            self.entry_point = entry;
        }
        if overrides.working_dir.is_some() {
            self.working_dir = overrides.working_dir;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            return Err(LauncherError::config("Interpreter command must be specified"));
        }

        // The module name is spliced into `-c "import <module>"`
        if !is_python_module_path(&self.gui_module) {
            return Err(LauncherError::config(format!(
                "GUI module must be a dotted Python identifier, got {:?}",
                self.gui_module
            )));
        }

        if self.manifest.as_os_str().is_empty() {
            return Err(LauncherError::config(
                "Dependency manifest path must be specified",
            ));
        }
        if self.entry_point.as_os_str().is_empty() {
            return Err(LauncherError::config("Entry point path must be specified"));
        }

        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(LauncherError::config(format!(
                    "Working directory {:?} does not exist",
                    dir
                )));
            }
        }

        Ok(())
    }

    /// Resolve a configured path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Reserved words that can never name a module
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

fn is_python_module_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            let identifier = match chars.next() {
                Some(first) if first == '_' || first.is_alphabetic() => {
                    chars.all(|c| c == '_' || c.is_alphanumeric())
                }
                _ => false,
            };
            identifier && !PYTHON_KEYWORDS.contains(&part)
        })
}
