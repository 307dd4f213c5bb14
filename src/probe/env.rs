//! Host environment probes: environment variables, PATH, processors.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::report::kind::SectionKind;
use crate::report::section::{ReportSection, LIST_LABEL_WIDTH};

/// A read-only snapshot of the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
    processors: Option<usize>,
    tmpdir: PathBuf,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os()
                .map(|(k, v)| {
                    (
                        k.to_string_lossy().to_string(),
                        v.to_string_lossy().to_string(),
                    )
                })
                .collect(),
            processors: std::thread::available_parallelism().ok().map(|n| n.get()),
            tmpdir: std::env::temp_dir(),
        }
    }

    /// Build a snapshot from explicit variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            processors: None,
            tmpdir: PathBuf::from("/tmp"),
        }
    }

    /// Override the processor count.
    pub fn with_processors(mut self, processors: usize) -> Self {
        self.processors = Some(processors);
        self
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// The PATH value, matched case-insensitively.
    pub fn path_var(&self) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("PATH"))
            .map(|(_, v)| v.as_str())
    }

    /// The login name, if known.
    pub fn user(&self) -> Option<&str> {
        self.get("USER")
            .or_else(|| self.get("USERNAME"))
            .filter(|u| !u.is_empty())
    }

    /// All variables, sorted by name.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

/// The ENV section: host summary, then every variable except PATH.
pub fn env_section(env: &EnvSnapshot) -> ReportSection {
    let mut section = ReportSection::new(SectionKind::Env, LIST_LABEL_WIDTH);

    if let Some(n) = env.processors {
        section.row("processors", &n.to_string());
    }
    if let Some(n) = env.get("NUMBER_OF_PROCESSORS") {
        section.row("NUMBER_OF_PROCESSORS", n);
    }
    section.row("tmpdir", &env.tmpdir.display().to_string());
    if let Some(temp) = env.get("RUNNER_TEMP") {
        section.row("RUNNER_TEMP", temp);
    }
    section.blank();

    for (key, value) in env.vars() {
        if key.eq_ignore_ascii_case("PATH") {
            continue;
        }
        section.row(key, value);
    }
    section
}

/// The Path section: one PATH entry per line.
pub fn path_section(env: &EnvSnapshot) -> ReportSection {
    let mut section = ReportSection::new(SectionKind::Path, 0);
    match env.path_var() {
        Some(path) => {
            for entry in std::env::split_paths(path) {
                section.raw(entry.display().to_string());
            }
        }
        None => section.raw("PATH is not set"),
    }
    section
}
