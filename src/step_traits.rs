//! Type-safe step command contracts.
//!
//! Each bootstrap step is a struct implementing `StepArgs`. The struct owns
//! the exact interpreter invocation, so the runner never assembles raw
//! argument vectors by hand.
//!
//! # Contract
//!
//! - `program()`: the command to spawn (resolved through the search path).
//! - `to_cli_args()`: arguments exactly as the interpreter expects them.
//! - `step_name()`: short stable name used in logs and test fakes.
//! - `output_mode()`: whether the step's console output is shown.

/// How a step's stdout/stderr are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Share the launcher's console (version banner, pip progress, the app)
    Inherit,
    /// Discard output (import probe tracebacks are noise)
    Quiet,
}

/// Trait for typed step arguments.
///
/// # Example
///
/// ```
/// use novelist_launcher::step_traits::StepArgs;
/// use novelist_launcher::steps::ImportProbe;
///
/// let probe = ImportProbe {
///     interpreter: "python".to_string(),
///     module: "PyQt6".to_string(),
/// };
///
/// assert_eq!(probe.to_cli_args(), vec!["-c", "import PyQt6"]);
/// ```
pub trait StepArgs {
    /// Command to spawn.
    fn program(&self) -> &str;

    /// Convert struct fields to CLI arguments.
    fn to_cli_args(&self) -> Vec<String>;

    /// Stable step name (e.g. "import_probe").
    fn step_name(&self) -> &'static str;

    /// Output wiring for this step.
    fn output_mode(&self) -> OutputMode {
        OutputMode::Inherit
    }

    /// Human-readable command line for logs.
    fn display_command(&self) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.to_cli_args().into_iter().map(|arg| {
            if arg.contains(' ') {
                format!("\"{}\"", arg)
            } else {
                arg
            }
        }));
        parts.join(" ")
    }
}
