//! Gem sub-command table and command-line splitting.

use crate::error::{RbdiagError, Result};

/// Sub-commands the wrapper forwards, sorted.
pub const GEM_COMMANDS: &[&str] = &[
    "build",
    "cert",
    "check",
    "cleanup",
    "contents",
    "dependency",
    "environment",
    "fetch",
    "help",
    "info",
    "install",
    "list",
    "lock",
    "outdated",
    "owner",
    "pristine",
    "query",
    "rdoc",
    "search",
    "sources",
    "specification",
    "uninstall",
    "unpack",
    "update",
    "which",
    "yank",
];

/// Short names accepted in place of a full command name.
const ALIASES: &[(&str, &str)] = &[("env", "environment")];

/// Whether `name` is a known sub-command.
pub fn is_gem_command(name: &str) -> bool {
    GEM_COMMANDS.binary_search(&name).is_ok()
}

/// A parsed gem command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemInvocation {
    /// The sub-command.
    pub command: String,
    /// Arguments before `--`.
    pub args: Vec<String>,
    /// Arguments after `--`, passed through to extension builds.
    pub build_args: Vec<String>,
}

impl GemInvocation {
    /// Split a command line such as `install hike --user-install -N`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let first = words.next().ok_or(RbdiagError::EmptyGemCommand)?;

        let command = ALIASES
            .iter()
            .find(|(alias, _)| *alias == first)
            .map(|(_, full)| full.to_string())
            .unwrap_or(first);

        if !is_gem_command(&command) {
            return Err(RbdiagError::UnknownGemCommand { name: command });
        }

        let rest: Vec<String> = words.collect();
        let (args, build_args) = match rest.iter().position(|w| w == "--") {
            Some(offset) => (rest[..offset].to_vec(), rest[offset + 1..].to_vec()),
            None => (rest, Vec::new()),
        };

        Ok(Self {
            command,
            args,
            build_args,
        })
    }

    /// The first non-option argument with any `:version` suffix removed.
    pub fn target_gem(&self) -> Option<&str> {
        self.args
            .iter()
            .find(|a| !a.starts_with('-'))
            .map(|a| a.split(':').next().unwrap_or(a))
    }

    /// Full argument vector for the `gem` executable.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + self.build_args.len() + 2);
        argv.push(self.command.clone());
        argv.extend(self.args.iter().cloned());
        if !self.build_args.is_empty() {
            argv.push("--".to_string());
            argv.extend(self.build_args.iter().cloned());
        }
        argv
    }
}
