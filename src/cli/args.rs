//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::gems::SpecDir;

/// rbdiag - Ruby installation diagnostics.
#[derive(Debug, Parser)]
#[command(name = "rbdiag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (merged over ~/.rbdiag/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ruby interpreter to diagnose
    #[arg(long, global = true, env = "RBDIAG_RUBY")]
    pub ruby: Option<PathBuf>,

    /// gem executable used by `rbdiag gem`
    #[arg(long, global = true, env = "RBDIAG_GEM")]
    pub gem: Option<PathBuf>,

    /// Skip network checks
    #[arg(long, global = true)]
    pub offline: bool,

    /// Seconds allowed for each external check
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the diagnostic report (default if no command specified)
    Report(ReportArgs),

    /// List installed gems by location
    Gems(GemsArgs),

    /// Run a gem command with friendlier error messages
    Gem(GemArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `report` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReportArgs {
    /// Sections to include (env, path, encodings, ruby, libs, ssl, gem_settings,
    /// gem_env, cli, gem_list, gem, all)
    #[arg(value_delimiter = ',')]
    pub sections: Vec<String>,

    /// Keep the login name in the output
    #[arg(long)]
    pub no_redact: bool,

    /// Specification directory to scan, as `location=path` or a bare path
    #[arg(long = "spec-dir", value_name = "DIR")]
    pub spec_dirs: Vec<SpecDir>,

    /// HTTPS endpoint for the certificate verification check
    #[arg(long, value_name = "URL")]
    pub ssl_url: Option<String>,
}

/// Arguments for the `gems` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GemsArgs {
    /// Specification directory to scan, as `location=path` or a bare path
    #[arg(long = "spec-dir", value_name = "DIR")]
    pub spec_dirs: Vec<SpecDir>,
}

/// Arguments for the `gem` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GemArgs {
    /// The gem command and its arguments, e.g. `uninstall minitest`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
