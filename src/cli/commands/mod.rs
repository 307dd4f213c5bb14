//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`], which also merges the configuration
//! files with the global flags.

pub mod completions;
pub mod dispatcher;
pub mod gem;
pub mod gems;
pub mod report;

pub use dispatcher::{resolve_config, Command, CommandDispatcher, CommandResult};
