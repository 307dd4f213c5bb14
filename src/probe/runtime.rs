//! Access to the Ruby interpreter under diagnosis.
//!
//! All Ruby-side facts are gathered in one interpreter run. Every query is
//! wrapped so that a `LoadError` or other exception is reported for that
//! query alone, and results come back as tagged, hex-encoded lines on stdout
//! so that arbitrary values (multi-line strings, odd encodings) survive.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RbdiagError, Result};
use crate::shell::{execute_program, CommandOptions};

use super::fact::{Fact, FactValue};

/// Prefix of every result line emitted by the probe script.
const LINE_MARKER: &str = "RBDIAG";

const PRELUDE: &str = r#"$stdout.sync = true
def __rbdiag_out(key, status, value = '')
  $stdout.write "RBDIAG\t#{key}\t#{status}\t#{value.to_s.b.unpack('H*')[0]}\n"
end
def __rbdiag_probe(key, lib)
  require lib if lib
  v = yield
  if v.nil?
    __rbdiag_out key, 'nil'
  else
    v = v.join(', ') if v.is_a?(Array)
    __rbdiag_out key, 'ok', v
  end
rescue LoadError
  __rbdiag_out key, 'load_error'
rescue StandardError, NotImplementedError => e
  __rbdiag_out key, 'error', e.class.name
end
"#;

/// One expression to evaluate inside the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubyQuery {
    /// Result key.
    pub key: &'static str,
    /// Library required before evaluating.
    pub library: Option<&'static str>,
    /// Ruby expression producing the value.
    pub expression: &'static str,
}

impl RubyQuery {
    /// A query with no library requirement.
    pub const fn new(key: &'static str, expression: &'static str) -> Self {
        Self {
            key,
            library: None,
            expression,
        }
    }

    /// A query that first requires `library`.
    pub const fn with_library(
        key: &'static str,
        library: &'static str,
        expression: &'static str,
    ) -> Self {
        Self {
            key,
            library: Some(library),
            expression,
        }
    }
}

/// Results of one batch of queries, keyed by query key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeFacts {
    values: HashMap<String, FactValue>,
}

impl RuntimeFacts {
    /// An empty result set; every lookup is unavailable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value.
    pub fn insert(&mut self, key: impl Into<String>, value: FactValue) {
        self.values.insert(key.into(), value);
    }

    /// The raw value for `key`, if the interpreter reported one.
    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.values.get(key)
    }

    /// The displayable fact for `key`.
    pub fn fact(&self, key: &str) -> Fact {
        Fact::from_optional(self.get(key))
    }

    /// The found value for `key`, if any.
    pub fn value(&self, key: &str) -> Option<String> {
        match self.fact(key) {
            Fact::Found(v) => Some(v),
            Fact::Unavailable => None,
        }
    }

    /// Number of reported values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A Ruby interpreter that can answer fact queries.
pub trait RubyRuntime {
    /// Evaluate a batch of queries.
    ///
    /// An `Err` means the interpreter itself could not be run; callers treat
    /// every fact as unavailable.
    fn evaluate(&self, queries: &[RubyQuery]) -> Result<RuntimeFacts>;

    /// Human-readable description for log messages.
    fn describe(&self) -> String;
}

/// Runs a `ruby` executable as a child process.
#[derive(Debug, Clone)]
pub struct ProcessRuntime {
    ruby: PathBuf,
    timeout: Duration,
}

impl ProcessRuntime {
    /// Create a runtime for the given interpreter.
    pub fn new(ruby: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ruby: ruby.into(),
            timeout,
        }
    }
}

impl RubyRuntime for ProcessRuntime {
    fn evaluate(&self, queries: &[RubyQuery]) -> Result<RuntimeFacts> {
        let ruby = self.ruby.to_string_lossy().to_string();
        let options = CommandOptions {
            stdin: Some(build_script(queries)),
            timeout: Some(self.timeout),
            ..Default::default()
        };

        tracing::debug!("Evaluating {} queries with {}", queries.len(), ruby);

        let result = execute_program(&ruby, &["-"], &options).map_err(|e| {
            RbdiagError::RuntimeUnavailable {
                ruby: ruby.clone(),
                message: e.to_string(),
            }
        })?;

        if result.timed_out {
            return Err(RbdiagError::RuntimeUnavailable {
                ruby,
                message: format!("timed out after {}s", self.timeout.as_secs()),
            });
        }

        if !result.success {
            tracing::debug!(
                "{} exited with {:?}: {}",
                ruby,
                result.exit_code,
                result.stderr.trim()
            );
        }

        let facts = parse_output(&result.stdout);
        if facts.is_empty() && !result.success {
            return Err(RbdiagError::RuntimeUnavailable {
                ruby,
                message: result.stderr.trim().to_string(),
            });
        }
        Ok(facts)
    }

    fn describe(&self) -> String {
        self.ruby.display().to_string()
    }
}

/// Build the probe script for a batch of queries.
pub fn build_script(queries: &[RubyQuery]) -> String {
    let mut script = String::from(PRELUDE);
    for query in queries {
        let library = match query.library {
            Some(lib) => format!("'{}'", lib),
            None => "nil".to_string(),
        };
        script.push_str(&format!(
            "__rbdiag_probe('{}', {}) {{ {} }}\n",
            query.key, library, query.expression
        ));
    }
    script
}

/// Parse the tagged result lines from the probe script's stdout.
///
/// Lines without the marker (output printed by required libraries) and
/// malformed lines are skipped.
pub fn parse_output(stdout: &str) -> RuntimeFacts {
    let mut facts = RuntimeFacts::new();

    for line in stdout.lines() {
        let mut parts = line.splitn(4, '\t');
        if parts.next() != Some(LINE_MARKER) {
            continue;
        }
        let (Some(key), Some(status)) = (parts.next(), parts.next()) else {
            continue;
        };
        let payload = match hex::decode(parts.next().unwrap_or("")) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
            Err(e) => {
                tracing::debug!("Bad payload for {}: {}", key, e);
                continue;
            }
        };

        let value = match status {
            "ok" => FactValue::Value(payload),
            "nil" => FactValue::Nil,
            "load_error" => FactValue::LoadError,
            "error" => FactValue::Error(payload),
            other => {
                tracing::debug!("Unknown status {} for {}", other, key);
                continue;
            }
        };
        facts.insert(key, value);
    }

    facts
}

/// An in-memory runtime with fixed answers.
#[derive(Debug, Clone, Default)]
pub struct FakeRuntime {
    facts: RuntimeFacts,
    unavailable: bool,
}

impl FakeRuntime {
    /// A runtime that answers nothing (every fact unavailable).
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime whose interpreter cannot be started.
    pub fn unavailable() -> Self {
        Self {
            facts: RuntimeFacts::new(),
            unavailable: true,
        }
    }

    /// Answer `key` with `value`.
    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.facts.insert(key, FactValue::Value(value.into()));
        self
    }

    /// Answer `key` with `nil`.
    pub fn with_nil(mut self, key: &str) -> Self {
        self.facts.insert(key, FactValue::Nil);
        self
    }

    /// Answer `key` with a `LoadError`.
    pub fn with_load_error(mut self, key: &str) -> Self {
        self.facts.insert(key, FactValue::LoadError);
        self
    }
}

impl RubyRuntime for FakeRuntime {
    fn evaluate(&self, queries: &[RubyQuery]) -> Result<RuntimeFacts> {
        if self.unavailable {
            return Err(RbdiagError::RuntimeUnavailable {
                ruby: "fake".to_string(),
                message: "not installed".to_string(),
            });
        }
        let mut facts = RuntimeFacts::new();
        for query in queries {
            if let Some(value) = self.facts.get(query.key) {
                facts.insert(query.key, value.clone());
            }
        }
        Ok(facts)
    }

    fn describe(&self) -> String {
        "fake".to_string()
    }
}
