//! Command-line interface for rbdiag.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, GemArgs, GemsArgs, ReportArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
