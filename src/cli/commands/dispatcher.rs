//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, ReportArgs};
use crate::config::{load_config, RbdiagConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Load the configuration files and apply the global flags over them.
pub fn resolve_config(cli: &Cli) -> Result<RbdiagConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    tracing::debug!("Resolved config: {:?}", config);
    Ok(config)
}

fn apply_overrides(config: &mut RbdiagConfig, cli: &Cli) {
    if let Some(ruby) = &cli.ruby {
        config.ruby = ruby.clone();
    }
    if let Some(gem) = &cli.gem {
        config.gem = gem.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.offline {
        config.offline = true;
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: RbdiagConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher with a resolved configuration.
    pub fn new(config: RbdiagConfig) -> Self {
        Self { config }
    }

    /// The configuration commands run with.
    pub fn config(&self) -> &RbdiagConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Report(args)) => {
                let cmd = super::report::ReportCommand::new(&self.config, args);
                cmd.execute(ui)
            }
            Some(Commands::Gems(args)) => {
                let cmd = super::gems::GemsCommand::new(&self.config, args);
                cmd.execute(ui)
            }
            Some(Commands::Gem(args)) => {
                let cmd = super::gem::GemCommand::new(&self.config, args);
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::report::ReportCommand::new(&self.config, &ReportArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rbdiag.yml");
        fs::write(&path, "ruby: /usr/bin/ruby\ngem: /usr/bin/gem\ntimeout_secs: 30\n").unwrap();

        let cli = Cli::parse_from([
            "rbdiag",
            "--config",
            path.to_str().unwrap(),
            "--ruby",
            "/opt/ruby/bin/ruby",
            "--offline",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.ruby, PathBuf::from("/opt/ruby/bin/ruby"));
        assert_eq!(config.gem, PathBuf::from("/usr/bin/gem"));
        assert_eq!(config.timeout_secs, 30);
        assert!(config.offline);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from(["rbdiag", "--config", "/nonexistent/rbdiag-test.yml"]);
        assert!(resolve_config(&cli).is_err());
    }
}
