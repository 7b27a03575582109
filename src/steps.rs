//! The four interpreter invocations the bootstrap performs.

use crate::config::LauncherConfig;
use crate::step_traits::{OutputMode, StepArgs};
use std::path::PathBuf;

/// Step 1: `<python> --version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterProbe {
    pub interpreter: String,
}

impl StepArgs for InterpreterProbe {
    fn program(&self) -> &str {
        &self.interpreter
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["--version".to_string()]
    }

    fn step_name(&self) -> &'static str {
        "interpreter_probe"
    }
}

/// Step 2a: `<python> -c "import <module>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportProbe {
    pub interpreter: String,
    pub module: String,
}

impl StepArgs for ImportProbe {
    fn program(&self) -> &str {
        &self.interpreter
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["-c".to_string(), format!("import {}", self.module)]
    }

    fn step_name(&self) -> &'static str {
        "import_probe"
    }

    fn output_mode(&self) -> OutputMode {
        OutputMode::Quiet
    }
}

/// Step 2b: `<python> -m pip install -r <manifest>`
///
/// Going through `-m pip` pins the install to the interpreter that was
/// probed, rather than whichever `pip` happens to be first on the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDependencies {
    pub interpreter: String,
    pub manifest: PathBuf,
}

impl StepArgs for InstallDependencies {
    fn program(&self) -> &str {
        &self.interpreter
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "-r".to_string(),
            self.manifest.to_string_lossy().to_string(),
        ]
    }

    fn step_name(&self) -> &'static str {
        "install_dependencies"
    }
}

/// Step 3: `<python> <entry point>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchApplication {
    pub interpreter: String,
    pub entry_point: PathBuf,
}

impl StepArgs for LaunchApplication {
    fn program(&self) -> &str {
        &self.interpreter
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![self.entry_point.to_string_lossy().to_string()]
    }

    fn step_name(&self) -> &'static str {
        "launch_application"
    }
}

impl From<&LauncherConfig> for InterpreterProbe {
    fn from(config: &LauncherConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
        }
    }
}

impl From<&LauncherConfig> for ImportProbe {
    fn from(config: &LauncherConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            module: config.gui_module.clone(),
        }
    }
}

impl From<&LauncherConfig> for InstallDependencies {
    fn from(config: &LauncherConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            manifest: config.manifest.clone(),
        }
    }
}

impl From<&LauncherConfig> for LaunchApplication {
    fn from(config: &LauncherConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            entry_point: config.entry_point.clone(),
        }
    }
}
