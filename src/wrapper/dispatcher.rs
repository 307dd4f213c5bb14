//! Forwarding gem commands to an executor.

use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::probe::registry::{keys, SUPPORT_QUERIES};
use crate::probe::{ProcessRuntime, RubyRuntime};
use crate::shell::{execute_program, CommandOptions};

use super::command::GemInvocation;

/// Captured result of one gem command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code (None if the command was killed).
    pub exit_code: Option<i32>,
}

impl DispatchOutput {
    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs gem commands.
pub trait GemDispatcher {
    /// Run one command and capture its output.
    fn dispatch(&self, invocation: &GemInvocation) -> Result<DispatchOutput>;

    /// The bundled gems' specification directory, if it can be determined.
    fn bundled_spec_dir(&self) -> Option<PathBuf>;
}

/// Runs the `gem` executable.
#[derive(Debug, Clone)]
pub struct ProcessDispatcher {
    gem: PathBuf,
    runtime: Option<ProcessRuntime>,
    timeout: Option<Duration>,
}

impl ProcessDispatcher {
    /// Create a dispatcher for the given `gem` executable.
    pub fn new(gem: impl Into<PathBuf>) -> Self {
        Self {
            gem: gem.into(),
            runtime: None,
            timeout: None,
        }
    }

    /// Use `runtime` to locate the bundled gems directory.
    pub fn with_runtime(mut self, runtime: ProcessRuntime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Kill commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl GemDispatcher for ProcessDispatcher {
    fn dispatch(&self, invocation: &GemInvocation) -> Result<DispatchOutput> {
        let gem = self.gem.to_string_lossy().to_string();
        let options = CommandOptions {
            timeout: self.timeout,
            ..Default::default()
        };
        let argv = invocation.argv();
        tracing::debug!("Running {} {}", gem, argv.join(" "));

        let result = execute_program(&gem, argv.as_slice(), &options)?;
        Ok(DispatchOutput {
            stdout: result.stdout,
            stderr: result.stderr,
            exit_code: result.exit_code,
        })
    }

    fn bundled_spec_dir(&self) -> Option<PathBuf> {
        let runtime = self.runtime.as_ref()?;
        let query = SUPPORT_QUERIES
            .iter()
            .find(|q| q.key == keys::BUNDLED_SPEC_DIR)?;
        match runtime.evaluate(std::slice::from_ref(query)) {
            Ok(facts) => facts.value(keys::BUNDLED_SPEC_DIR).map(PathBuf::from),
            Err(e) => {
                tracing::debug!("Cannot locate bundled gems: {}", e);
                None
            }
        }
    }
}

/// A dispatcher that returns canned output and records what it was asked.
#[derive(Debug, Default)]
pub struct FakeDispatcher {
    output: DispatchOutput,
    bundled: Option<PathBuf>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeDispatcher {
    /// Answer every command with `output`.
    pub fn new(output: DispatchOutput) -> Self {
        Self {
            output,
            ..Default::default()
        }
    }

    /// Report `dir` as the bundled specifications directory.
    pub fn with_bundled_spec_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled = Some(dir.into());
        self
    }

    /// Argument vectors received so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl GemDispatcher for FakeDispatcher {
    fn dispatch(&self, invocation: &GemInvocation) -> Result<DispatchOutput> {
        self.calls.borrow_mut().push(invocation.argv());
        Ok(self.output.clone())
    }

    fn bundled_spec_dir(&self) -> Option<PathBuf> {
        self.bundled.clone()
    }
}
