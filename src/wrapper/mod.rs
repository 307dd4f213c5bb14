//! Running RubyGems sub-commands with friendlier failure messages.
//!
//! - [`command`] - The sub-command table and command-line splitting
//! - [`dispatcher`] - Executors for parsed commands
//!
//! [`GemWrapper`] forwards a command line to a [`GemDispatcher`] and rewrites
//! two well-known stderr messages (uninstalling a bundled gem, and
//! uninstalling a gem something else depends on) into plain explanations.

pub mod command;
pub mod dispatcher;

pub use command::{is_gem_command, GemInvocation, GEM_COMMANDS};
pub use dispatcher::{DispatchOutput, FakeDispatcher, GemDispatcher, ProcessDispatcher};

use crate::error::Result;
use crate::gems::{scan_spec_dir, GemVersion};

const NOT_IN_GEM_HOME: &str = "is not installed in GEM_HOME";
const DEPENDENCY_REMOVAL: &str = "Gem::DependencyRemovalException";

/// Output of a wrapped gem command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperOutput {
    /// Standard output, verbatim.
    pub stdout: String,
    /// Standard error, possibly rewritten.
    pub stderr: String,
    /// Whether the command succeeded.
    pub success: bool,
}

/// Parses, forwards and post-processes gem commands.
pub struct GemWrapper {
    dispatcher: Box<dyn GemDispatcher>,
}

impl GemWrapper {
    /// Create a wrapper around `dispatcher`.
    pub fn new(dispatcher: Box<dyn GemDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Run a command line such as `uninstall minitest -v 5.20.0`.
    pub fn run(&self, line: &str) -> Result<WrapperOutput> {
        let invocation = GemInvocation::parse(line)?;
        let output = self.dispatcher.dispatch(&invocation)?;
        let stderr = self.rewrite_stderr(&invocation, &output.stderr);

        Ok(WrapperOutput {
            success: output.success(),
            stdout: output.stdout,
            stderr,
        })
    }

    fn rewrite_stderr(&self, invocation: &GemInvocation, stderr: &str) -> String {
        let gem = invocation.target_gem().unwrap_or_default();

        if stderr.contains(NOT_IN_GEM_HOME) {
            tracing::debug!("Rewriting bundled gem uninstall error for {}", gem);
            let name = match self.bundled_version(gem) {
                Some(version) => format!("{}-{}", gem, version),
                None => gem.to_string(),
            };
            return format!(
                "ERROR: Gem {} cannot be uninstalled because it is a bundled gem\n",
                name
            );
        }

        if invocation.command == "uninstall" && stderr.contains(DEPENDENCY_REMOVAL) {
            tracing::debug!("Rewriting dependency removal error for {}", gem);
            return format!(
                "ERROR: Gem '{}' cannot be uninstalled because another gem depends on it.\n\
                 Use the '-I' argument to force uninstall.\n",
                gem
            );
        }

        stderr.to_string()
    }

    /// Newest version of `gem` in the bundled specifications directory.
    fn bundled_version(&self, gem: &str) -> Option<String> {
        let dir = self.dispatcher.bundled_spec_dir()?;
        scan_spec_dir(&dir, &[])
            .into_iter()
            .filter(|spec| spec.name == gem)
            .map(|spec| GemVersion::parse(&spec.version))
            .max()
            .map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RbdiagError;
    use std::fs;
    use tempfile::TempDir;

    fn failing(stderr: &str) -> DispatchOutput {
        DispatchOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(1),
        }
    }

    #[test]
    fn passes_output_through() {
        let fake = FakeDispatcher::new(DispatchOutput {
            stdout: "*** LOCAL GEMS ***\n\nrake (13.1.0)\n".into(),
            stderr: "warning: something\n".into(),
            exit_code: Some(0),
        });
        let out = GemWrapper::new(Box::new(fake)).run("list").unwrap();
        assert!(out.success);
        assert!(out.stdout.contains("rake (13.1.0)"));
        assert_eq!(out.stderr, "warning: something\n");
    }

    #[test]
    fn unknown_command_never_dispatches() {
        let wrapper = GemWrapper::new(Box::new(FakeDispatcher::default()));
        let err = wrapper.run("frobnicate").unwrap_err();
        assert!(matches!(err, RbdiagError::UnknownGemCommand { .. }));
    }

    #[test]
    fn bundled_gem_uninstall_is_explained() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("minitest-5.20.0.gemspec"), "").unwrap();
        fs::write(temp.path().join("minitest-5.16.3.gemspec"), "").unwrap();

        let fake = FakeDispatcher::new(failing(
            "ERROR:  While executing gem ... (Gem::InstallError)\n    \
             gem \"minitest\" is not installed in GEM_HOME, try:\n",
        ))
        .with_bundled_spec_dir(temp.path());
        let out = GemWrapper::new(Box::new(fake))
            .run("uninstall minitest")
            .unwrap();

        assert!(!out.success);
        assert_eq!(
            out.stderr,
            "ERROR: Gem minitest-5.20.0 cannot be uninstalled because it is a bundled gem\n"
        );
    }

    #[test]
    fn bundled_gem_without_known_version() {
        let fake = FakeDispatcher::new(failing("gem \"rbs\" is not installed in GEM_HOME"));
        let out = GemWrapper::new(Box::new(fake)).run("uninstall rbs").unwrap();
        assert_eq!(
            out.stderr,
            "ERROR: Gem rbs cannot be uninstalled because it is a bundled gem\n"
        );
    }

    #[test]
    fn dependency_removal_is_explained() {
        let fake = FakeDispatcher::new(failing(
            "ERROR:  While executing gem ... (Gem::DependencyRemovalException)\n",
        ));
        let out = GemWrapper::new(Box::new(fake))
            .run("uninstall -x racc:1.7.3")
            .unwrap();
        assert_eq!(
            out.stderr,
            "ERROR: Gem 'racc' cannot be uninstalled because another gem depends on it.\n\
             Use the '-I' argument to force uninstall.\n"
        );
    }

    #[test]
    fn dependency_message_only_rewritten_for_uninstall() {
        let stderr = "Gem::DependencyRemovalException mentioned elsewhere\n";
        let fake = FakeDispatcher::new(failing(stderr));
        let out = GemWrapper::new(Box::new(fake)).run("cleanup racc").unwrap();
        assert_eq!(out.stderr, stderr);
    }
}
