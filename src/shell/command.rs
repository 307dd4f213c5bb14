//! Process execution with captured output.

use crate::error::{RbdiagError, Result};
use std::ffi::OsStr;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed after exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Directories prepended to PATH for this command only.
    pub path_prepend: Vec<PathBuf>,

    /// Data written to the child's stdin, which is then closed.
    pub stdin: Option<String>,

    /// Timeout (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Execute a command line through the platform shell.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(detect_shell());
    cmd.arg(shell_flag());
    cmd.arg(command);
    run(cmd, command, options)
}

/// Execute a program directly with explicit arguments (no shell parsing).
pub fn execute_program<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    run(cmd, program, options)
}

fn run(mut cmd: Command, label: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    if !options.path_prepend.is_empty() {
        let mut entries = options.path_prepend.clone();
        if let Some(existing) = std::env::var_os("PATH") {
            entries.extend(std::env::split_paths(&existing));
        }
        if let Ok(joined) = std::env::join_paths(entries) {
            cmd.env("PATH", joined);
        }
    }

    cmd.stdin(if options.stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Spawning: {}", label);

    let mut child = cmd.spawn().map_err(|source| {
        tracing::debug!("Failed to spawn {}: {}", label, source);
        RbdiagError::SpawnFailed {
            command: label.to_string(),
            source,
        }
    })?;

    if let Some(input) = &options.stdin {
        if let Some(mut pipe) = child.stdin.take() {
            let input = input.clone();
            // Written on a thread so a child that never reads cannot block us.
            thread::spawn(move || {
                use std::io::Write;
                let _ = pipe.write_all(input.as_bytes());
            });
        }
    }

    let stdout_handle = child.stdout.take().map(spawn_reader);
    let stderr_handle = child.stderr.take().map(spawn_reader);

    let (status, timed_out) = wait_with_timeout(&mut child, options.timeout).map_err(|_| {
        RbdiagError::CommandFailed {
            command: label.to_string(),
            code: None,
        }
    })?;

    // A grandchild of the shell can keep the pipes open after the kill, so
    // the readers are only joined when the child exited on its own.
    let (stdout, stderr) = if timed_out {
        tracing::debug!("{} timed out; discarding its output", label);
        (String::new(), String::new())
    } else {
        (join_reader(stdout_handle), join_reader(stderr_handle))
    };

    let duration = start.elapsed();

    match status {
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
        None => {
            let mut result = CommandResult::failure(None, stdout, stderr, duration);
            result.timed_out = timed_out;
            Ok(result)
        }
    }
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).to_string()
    })
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::io::Result<(Option<std::process::ExitStatus>, bool)> {
    let Some(timeout) = timeout else {
        return child.wait().map(|s| (Some(s), false));
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((Some(status), false));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok((None, true));
        }
        thread::sleep(Duration::from_millis(20));
    }
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

/// Get the flag to pass commands to the shell.
///
/// A plain `-c` is used rather than a login shell: login profiles reorder
/// PATH, which would hide the Ruby `bindir` prepended for tool checks.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 3", &CommandOptions::default()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_stderr_separately() {
        let result = execute("echo out; echo err >&2", &CommandOptions::default()).unwrap();

        assert!(result.stdout.contains("out"));
        assert!(!result.stdout.contains("err"));
        assert!(result.stderr.contains("err"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_feeds_stdin() {
        let options = CommandOptions {
            stdin: Some("piped input\n".to_string()),
            ..Default::default()
        };

        let result = execute("cat", &options).unwrap();

        assert!(result.stdout.contains("piped input"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_prepends_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            path_prepend: vec![temp.path().to_path_buf()],
            ..Default::default()
        };

        let result = execute("echo $PATH", &options).unwrap();

        assert!(result
            .stdout
            .starts_with(temp.path().to_string_lossy().as_ref()));
    }

    #[cfg(unix)]
    #[test]
    fn execute_kills_on_timeout() {
        let options = CommandOptions {
            timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        };

        let result = execute_program("sleep", &["5"], &options).unwrap();

        assert!(!result.success);
        assert!(result.timed_out);
        assert!(result.duration < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_is_not_extended_by_grandchildren() {
        let options = CommandOptions {
            timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        };

        // The shell forks `sleep`, which inherits stdout and outlives the kill.
        let result = execute("sleep 5; echo done", &options).unwrap();

        assert!(result.timed_out);
        assert!(result.duration < Duration::from_secs(4));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn execute_program_reports_spawn_failure() {
        let args: [&str; 0] = [];
        let err = execute_program(
            "/nonexistent/rbdiag-test-binary",
            &args,
            &CommandOptions::default(),
        )
        .unwrap_err();

        match err {
            RbdiagError::SpawnFailed { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
