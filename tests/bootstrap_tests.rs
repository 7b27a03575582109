//! End-to-end bootstrap tests against a fake interpreter
//!
//! The fake `python` is a shell script that appends its arguments to a log
//! file and exits with a per-step code, so every test can check exactly
//! which steps ran, in what order and how many times.

#![cfg(unix)]

use novelist_launcher::{BootstrapRunner, LauncherConfig, LauncherError, Outcome, Pause, SystemRunner};
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Exit codes the fake interpreter returns for each step
#[derive(Default)]
struct FakePython {
    version: i32,
    import: i32,
    pip: i32,
    app: i32,
}

struct Sandbox {
    dir: TempDir,
    interpreter: PathBuf,
    log: PathBuf,
}

impl Sandbox {
    fn new(fake: FakePython) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let log = dir.path().join("calls.log");
        let interpreter = dir.path().join("fake-python");

        let script = format!(
            r#"#!/bin/sh
echo "$*" >> "{log}"
case "$1" in
    --version) exit {version} ;;
    -c) exit {import} ;;
    -m) exit {pip} ;;
    *) exit {app} ;;
esac
"#,
            log = log.display(),
            version = fake.version,
            import = fake.import,
            pip = fake.pip,
            app = fake.app,
        );
        fs::write(&interpreter, script).expect("write fake interpreter");
        fs::set_permissions(&interpreter, fs::Permissions::from_mode(0o755))
            .expect("chmod fake interpreter");

        fs::write(dir.path().join("requirements.txt"), "PyQt6>=6.4\n").expect("write manifest");
        fs::write(dir.path().join("main.py"), "").expect("write entry point");

        Self {
            dir,
            interpreter,
            log,
        }
    }

    fn config(&self) -> LauncherConfig {
        LauncherConfig {
            interpreter: self.interpreter.to_string_lossy().to_string(),
            working_dir: Some(self.dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn run(&self) -> (Outcome, usize) {
        let config = self.config();
        let runner = SystemRunner::new(config.working_dir.clone());
        let mut bootstrap = BootstrapRunner::new(config, runner, CountingPause::default());
        let outcome = bootstrap.run();
        let (_, pause) = bootstrap.into_parts();
        (outcome, pause.waits)
    }
}

#[derive(Default)]
struct CountingPause {
    waits: usize,
}

impl Pause for CountingPause {
    fn wait(&mut self) -> io::Result<()> {
        self.waits += 1;
        Ok(())
    }
}

#[test]
fn test_happy_path_skips_installer() {
    let sandbox = Sandbox::new(FakePython::default());
    let (outcome, waits) = sandbox.run();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(waits, 1);
    assert_eq!(
        sandbox.calls(),
        vec!["--version", "-c import PyQt6", "main.py"]
    );
}

#[test]
fn test_missing_module_installs_then_launches() {
    let sandbox = Sandbox::new(FakePython {
        import: 1,
        ..Default::default()
    });
    let (outcome, waits) = sandbox.run();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(waits, 1);
    assert_eq!(
        sandbox.calls(),
        vec![
            "--version",
            "-c import PyQt6",
            "-m pip install -r requirements.txt",
            "main.py"
        ]
    );
}

#[test]
fn test_failed_install_never_launches() {
    let sandbox = Sandbox::new(FakePython {
        import: 1,
        pip: 1,
        ..Default::default()
    });
    let (outcome, waits) = sandbox.run();

    assert!(matches!(
        outcome,
        Outcome::Failed(LauncherError::DependencyInstallFailed { exit_code: Some(1), .. })
    ));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(waits, 1);

    let calls = sandbox.calls();
    assert_eq!(calls.iter().filter(|c| c.starts_with("-m pip")).count(), 1);
    assert!(!calls.iter().any(|c| c == "main.py"));
}

#[test]
fn test_broken_interpreter_stops_at_version_check() {
    let sandbox = Sandbox::new(FakePython {
        version: 9009,
        ..Default::default()
    });
    let (outcome, waits) = sandbox.run();

    assert!(matches!(
        outcome,
        Outcome::Failed(LauncherError::InterpreterMissing { .. })
    ));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(waits, 1);
    assert_eq!(sandbox.calls(), vec!["--version"]);
}

#[test]
fn test_absent_interpreter() {
    let sandbox = Sandbox::new(FakePython::default());
    let mut config = sandbox.config();
    config.interpreter = sandbox.dir.path().join("no-such-python").to_string_lossy().to_string();

    let runner = SystemRunner::new(config.working_dir.clone());
    let mut bootstrap = BootstrapRunner::new(config, runner, CountingPause::default());
    let outcome = bootstrap.run();

    assert_eq!(outcome.exit_code(), 1);
    assert!(sandbox.calls().is_empty());
}

#[test]
fn test_application_exit_code_is_propagated() {
    let sandbox = Sandbox::new(FakePython {
        app: 7,
        ..Default::default()
    });
    let (outcome, _) = sandbox.run();

    assert!(matches!(outcome, Outcome::Launched { exit_code: 7 }));
    assert_eq!(sandbox.calls().iter().filter(|c| *c == "main.py").count(), 1);
}

// =============================================================================
// Binary tests
// =============================================================================

fn launcher(sandbox: &Sandbox) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_novelist-launcher"));
    cmd.arg("--python")
        .arg(&sandbox.interpreter)
        .arg("--workdir")
        .arg(sandbox.dir.path())
        // Null stdin acknowledges the pause immediately
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

#[test]
fn test_binary_propagates_exit_code_and_pauses() {
    let sandbox = Sandbox::new(FakePython {
        app: 4,
        ..Default::default()
    });
    let output = launcher(&sandbox).output().expect("run launcher");

    assert_eq!(output.status.code(), Some(4));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Starting Novelist AI"));
    assert!(stdout.contains("Press any key to continue"));
}

#[test]
fn test_binary_reports_missing_python() {
    let sandbox = Sandbox::new(FakePython::default());
    let output = Command::new(env!("CARGO_BIN_EXE_novelist-launcher"))
        .arg("--python")
        .arg(sandbox.dir.path().join("missing-python"))
        .stdin(Stdio::null())
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("python.org"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Press any key to continue"));
}

#[test]
fn test_binary_reports_missing_manifest() {
    let sandbox = Sandbox::new(FakePython {
        import: 1,
        pip: 1,
        ..Default::default()
    });
    fs::remove_file(sandbox.dir.path().join("requirements.txt")).expect("remove manifest");

    let output = launcher(&sandbox).output().expect("run launcher");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("was not found"));
}

#[test]
fn test_binary_validate_subcommand() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("launcher.json");

    let status = Command::new(env!("CARGO_BIN_EXE_novelist-launcher"))
        .arg("init-config")
        .arg(&path)
        .status()
        .expect("run init-config");
    assert!(status.success());
    assert!(path.exists());

    let status = Command::new(env!("CARGO_BIN_EXE_novelist-launcher"))
        .arg("validate")
        .arg(&path)
        .status()
        .expect("run validate");
    assert!(status.success());

    fs::write(&path, r#"{ "gui_module": "not a module" }"#).expect("write config");
    let status = Command::new(env!("CARGO_BIN_EXE_novelist-launcher"))
        .arg("validate")
        .arg(&path)
        .status()
        .expect("run validate");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_binary_reports_missing_python_once() {
    let sandbox = Sandbox::new(FakePython::default());
    let output = Command::new(env!("CARGO_BIN_EXE_novelist-launcher"))
        .arg("--python")
        .arg(sandbox.dir.path().join("missing-python"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run launcher");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("is not available").count(), 1, "stderr: {}", stderr);
    assert!(!stderr.contains('\u{1b}'), "no ANSI escapes on a pipe");
}

#[test]
fn test_binary_reports_failed_install_once() {
    let sandbox = Sandbox::new(FakePython {
        import: 1,
        pip: 3,
        ..Default::default()
    });
    let output = launcher(&sandbox)
        .env_remove("RUST_LOG")
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("Failed to install dependencies").count(),
        1,
        "stderr: {}",
        stderr
    );
}
