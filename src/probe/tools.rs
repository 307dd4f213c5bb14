//! Bundled command-line tool and standard library load checks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::RbdiagError;
use crate::gems::GemVersion;
use crate::report::section::ljust;
use crate::shell::{execute, execute_program, CommandOptions, CommandResult};

use super::fact::FactValue;
use super::runtime::{RubyQuery, RuntimeFacts};

/// Version capture shared by every tool pattern.
pub const VERSION_PATTERN: &str = r"(\d{1,2}\.\d{1,2}\.\d{1,2}(\.[a-z0-9.]+)?)";

/// Width of the command column.
pub const CLI_WIDTH: usize = 36;

const NAME_WIDTH: usize = 10;
const REQUIRE_LABEL_WIDTH: usize = 11;

/// A tool installed alongside Ruby.
#[derive(Debug, Clone, Copy)]
pub struct CliTool {
    /// Binstub name.
    pub name: &'static str,
    /// Arguments that print the version.
    pub args: &'static [&'static str],
    /// Pattern preceding the version at the start of the output.
    pub prefix: &'static str,
    /// Oldest Ruby that ships the tool.
    pub since_ruby: Option<&'static str>,
}

/// Tools checked, in display order.
pub const CLI_TOOLS: &[CliTool] = &[
    CliTool { name: "bundle", args: &["-v"], prefix: "Bundler version ", since_ruby: None },
    CliTool { name: "gem", args: &["--version"], prefix: "", since_ruby: None },
    CliTool { name: "irb", args: &["--version"], prefix: "irb +", since_ruby: None },
    CliTool { name: "racc", args: &["--version"], prefix: "racc version ", since_ruby: None },
    CliTool { name: "rake", args: &["-V"], prefix: "rake, version ", since_ruby: None },
    CliTool { name: "rbs", args: &["-v"], prefix: "rbs ", since_ruby: Some("3.0") },
    CliTool { name: "rdbg", args: &["-v"], prefix: "rdbg ", since_ruby: Some("3.1") },
    CliTool { name: "rdoc", args: &["-v"], prefix: "", since_ruby: None },
];

/// A library whose `require` is tested.
#[derive(Debug, Clone, Copy)]
pub struct RequireTest {
    /// Query key.
    pub key: &'static str,
    /// Path passed to `require`.
    pub library: &'static str,
    /// Displayed constant name.
    pub label: &'static str,
    /// Ruby version range where the test applies (`[from, before)`).
    pub applies: (Option<&'static str>, Option<&'static str>),
    /// Only tested on Windows builds.
    pub windows_only: bool,
}

/// Libraries tested, in display order.
pub const REQUIRE_TESTS: &[RequireTest] = &[
    RequireTest { key: "require_dbm", library: "dbm", label: "DBM", applies: (None, Some("3.1")), windows_only: false },
    RequireTest { key: "require_debug", library: "debug", label: "Debug", applies: (Some("3.0"), None), windows_only: false },
    RequireTest { key: "require_digest", library: "digest", label: "Digest", applies: (None, None), windows_only: false },
    RequireTest { key: "require_fiddle", library: "fiddle", label: "Fiddle", applies: (None, None), windows_only: false },
    RequireTest { key: "require_socket", library: "socket", label: "Socket", applies: (None, None), windows_only: false },
    RequireTest { key: "require_win32_registry", library: "win32/registry", label: "Win32::Registry", applies: (None, None), windows_only: true },
    RequireTest { key: "require_win32ole", library: "win32ole", label: "WIN32OLE", applies: (None, None), windows_only: true },
];

/// Queries for every require test.
pub fn require_queries() -> Vec<RubyQuery> {
    REQUIRE_TESTS
        .iter()
        .map(|t| RubyQuery::with_library(t.key, t.library, "true"))
        .collect()
}

/// Facts about the interpreter that gate the checks.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Ruby's `bindir`.
    pub bindir: Option<PathBuf>,
    /// `RUBY_VERSION`.
    pub ruby_version: Option<GemVersion>,
    /// Whether the interpreter is a Windows build.
    pub windows: bool,
    /// Per-command timeout.
    pub timeout: Option<Duration>,
}

impl ToolContext {
    fn ruby_before(&self, version: &str) -> bool {
        match &self.ruby_version {
            Some(ruby) => *ruby < GemVersion::parse(version),
            None => false,
        }
    }
}

static VERSION_REGEXES: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    CLI_TOOLS
        .iter()
        .map(|tool| {
            let pattern = format!(r"\A{}{}", tool.prefix, VERSION_PATTERN);
            let re = Regex::new(&pattern).expect("tool version pattern must compile");
            (tool.name, re)
        })
        .collect()
});

/// Pull the version out of a tool's output.
pub fn extract_version(tool: &CliTool, output: &str) -> Option<String> {
    VERSION_REGEXES
        .get(tool.name)?
        .captures(output.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn binstub(bindir: &Path, name: &str) -> Option<PathBuf> {
    [name.to_string(), format!("{}.bat", name), format!("{}.cmd", name)]
        .into_iter()
        .map(|file| bindir.join(file))
        .find(|path| path.is_file())
}

/// Check one tool; returns the padded command column.
pub fn check_tool(tool: &CliTool, ctx: &ToolContext) -> String {
    let name = ljust(tool.name, NAME_WIDTH);

    if let Some(since) = tool.since_ruby {
        if ctx.ruby_before(since) {
            return ljust(&format!("{}na", name), CLI_WIDTH);
        }
    }

    let Some(bindir) = &ctx.bindir else {
        return ljust(&format!("{}❌   missing binstub", name), CLI_WIDTH);
    };
    let Some(stub) = binstub(bindir, tool.name) else {
        tracing::debug!("No binstub for {} in {}", tool.name, bindir.display());
        return ljust(&format!("{}❌   missing binstub", name), CLI_WIDTH);
    };

    let options = CommandOptions {
        path_prepend: vec![bindir.clone()],
        timeout: ctx.timeout,
        ..Default::default()
    };
    let status = match run_binstub(&stub, tool, &options) {
        Ok(result) if result.timed_out => "❌   timeout".to_string(),
        Ok(result) => match extract_version(tool, &result.stdout) {
            Some(version) => format!("✅   {}", version),
            None => {
                tracing::debug!("{} printed: {}", stub.display(), result.stdout.trim());
                "❌   version?".to_string()
            }
        },
        Err(e) => {
            tracing::debug!("{} failed: {}", stub.display(), e);
            format!("❌   {}", error_kind(&e))
        }
    };
    ljust(&format!("{}{}", name, status), CLI_WIDTH)
}

/// Batch files need the command interpreter; everything else runs directly.
fn run_binstub(
    stub: &Path,
    tool: &CliTool,
    options: &CommandOptions,
) -> crate::error::Result<CommandResult> {
    let is_batch = stub
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bat") || ext.eq_ignore_ascii_case("cmd"));
    if is_batch {
        execute(&format!("{} {}", tool.name, tool.args.join(" ")), options)
    } else {
        execute_program(&stub.to_string_lossy(), tool.args, options)
    }
}

/// A short name for why a tool could not run.
fn error_kind(err: &RbdiagError) -> String {
    match err {
        RbdiagError::SpawnFailed { source, .. } => format!("{:?}", source.kind()),
        other => other.to_string(),
    }
}

/// Render one require test, or `None` when it does not apply to this build.
pub fn require_result(test: &RequireTest, facts: &RuntimeFacts, ctx: &ToolContext) -> Option<String> {
    if test.windows_only && !ctx.windows {
        return None;
    }
    let label = ljust(test.label, REQUIRE_LABEL_WIDTH);

    let (from, before) = test.applies;
    let out_of_range = from.is_some_and(|v| ctx.ruby_before(v))
        || before.is_some_and(|v| ctx.ruby_version.is_some() && !ctx.ruby_before(v));
    if out_of_range {
        return Some(format!("{}  na", label));
    }

    let status = match facts.get(test.key) {
        Some(FactValue::Value(_)) | Some(FactValue::Nil) => "✅".to_string(),
        Some(FactValue::LoadError) | None => "❌ LoadError".to_string(),
        Some(FactValue::Error(class)) => class.clone(),
    };
    Some(format!("{}  {}", label, status))
}
