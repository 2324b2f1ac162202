use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::DiffError;

#[cfg(target_family = "unix")]
use std::env::var_os;

/// Result of running a diff command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Standard output of a synchronous run; `None` for asynchronous runs.
    pub captured_output: Option<String>,
    /// Exit status of a synchronous run. Informational only: `diff` exits
    /// with 1 whenever the inputs differ.
    pub exit_code: Option<i32>,
}

/// Platform-specific shell detection
#[cfg(target_family = "unix")]
fn detect_shell() -> (String, Vec<String>) {
    let shell = var_os("SHELL")
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "/bin/sh".to_string());

    (shell, vec!["-c".to_string()])
}

#[cfg(target_family = "windows")]
fn detect_shell() -> (String, Vec<String>) {
    ("cmd.exe".to_string(), vec!["/C".to_string()])
}

/// A command line handed to the platform shell.
pub struct ShellCommand {
    command_line: String,
    shell: Option<String>,
    working_dir: Option<PathBuf>,
}

impl ShellCommand {
    pub fn new(command_line: &str) -> Self {
        ShellCommand {
            command_line: command_line.to_string(),
            shell: None,
            working_dir: None,
        }
    }

    /// Use `program` instead of the detected shell.
    pub fn shell(mut self, program: &str) -> Self {
        self.shell = Some(program.to_string());
        self
    }

    pub fn working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    fn build(&self) -> Command {
        let (detected, args) = detect_shell();
        let program = self.shell.clone().unwrap_or(detected);

        let mut cmd = Command::new(program);
        cmd.args(args).arg(&self.command_line);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd
    }

    /// Run to completion and capture standard output. Standard error is
    /// discarded. Blocks the caller for as long as the command runs.
    pub fn execute(&self) -> Result<RunResult, DiffError> {
        let mut cmd = self.build();
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());

        info!(command = %self.command_line, "running diff command");
        let output = cmd
            .output()
            .map_err(|e| DiffError::Spawn(format!("{}: {}", self.command_line, e)))?;

        let exit_code = output.status.code();
        debug!(?exit_code, bytes = output.stdout.len(), "diff command finished");

        Ok(RunResult {
            captured_output: Some(String::from_utf8_lossy(&output.stdout).to_string()),
            exit_code,
        })
    }

    /// Start the command and return without waiting for it. The child's
    /// output goes wherever ours does and no handle to it is kept.
    pub fn spawn_detached(&self) -> Result<RunResult, DiffError> {
        let mut cmd = self.build();

        info!(command = %self.command_line, "spawning diff command");
        let mut child = cmd
            .spawn()
            .map_err(|e| DiffError::Spawn(format!("{}: {}", self.command_line, e)))?;
        debug!(pid = child.id(), "diff command detached");

        // Reaped in the background, never handed back.
        std::thread::spawn(move || child.wait());

        Ok(RunResult::default())
    }
}

/// Executes diff command lines.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    fn run(&self, command_line: &str, synchronous: bool) -> Result<RunResult, DiffError>;
}

/// [`ProcessRunner`] backed by the platform shell.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    shell: Option<String>,
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shell(mut self, program: &str) -> Self {
        self.shell = Some(program.to_string());
        self
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    fn command(&self, command_line: &str) -> ShellCommand {
        let mut cmd = ShellCommand::new(command_line);
        if let Some(ref shell) = self.shell {
            cmd = cmd.shell(shell);
        }
        if let Some(ref dir) = self.working_dir {
            cmd = cmd.working_dir(dir.clone());
        }
        cmd
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str, synchronous: bool) -> Result<RunResult, DiffError> {
        let cmd = self.command(command_line);
        if synchronous {
            cmd.execute()
        } else {
            cmd.spawn_detached()
        }
    }
}

#[cfg(all(test, target_family = "unix"))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sh() -> ShellRunner {
        ShellRunner::new().with_shell("/bin/sh")
    }

    #[test]
    fn test_captures_stdout() {
        let result = ShellRunner::new().run("printf 'X\\n'", true).unwrap();

        assert_eq!(result.captured_output.as_deref(), Some("X\n"));
        assert_eq!(result.exit_code, Some(0));
    }

    #[test]
    fn test_stderr_is_discarded() {
        let result = sh().run("echo out; echo err >&2", true).unwrap();

        assert_eq!(result.captured_output.as_deref(), Some("out\n"));
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let result = sh().run("echo changed; exit 1", true).unwrap();

        assert_eq!(result.captured_output.as_deref(), Some("changed\n"));
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn test_async_returns_without_waiting() {
        let start = Instant::now();
        let result = sh().run("sleep 5", false).unwrap();

        assert!(start.elapsed() < Duration::from_secs(3));
        assert_eq!(result, RunResult::default());
    }

    #[test]
    fn test_missing_shell_is_a_spawn_error() {
        let runner = ShellRunner::new().with_shell("/nonexistent/difftool/sh");

        assert!(matches!(runner.run("true", true), Err(DiffError::Spawn(_))));
        assert!(matches!(runner.run("true", false), Err(DiffError::Spawn(_))));
    }

    #[test]
    fn test_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = sh()
            .with_working_dir(dir.path().to_path_buf())
            .run("pwd", true)
            .unwrap();

        let reported = PathBuf::from(result.captured_output.unwrap().trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
