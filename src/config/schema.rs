//! Configuration file format.
//!
//! Every field is optional; missing fields take the defaults below, and
//! command-line flags override whatever the files say.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::gems::{GemLocation, SpecDir};
use crate::probe::tls::{DEFAULT_TIMEOUT_SECS, DEFAULT_VERIFY_URL};

/// Root of `config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RbdiagConfig {
    /// Ruby interpreter to diagnose.
    pub ruby: PathBuf,

    /// `gem` executable used by the command wrapper.
    pub gem: PathBuf,

    /// Sections to report when none are given on the command line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,

    /// Specification directories to scan instead of asking the interpreter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spec_dirs: Vec<SpecDirConfig>,

    /// HTTPS endpoint used for the certificate verification check.
    pub ssl_verify_url: String,

    /// Seconds allowed for each external process and network check.
    pub timeout_secs: u64,

    /// Replace the login name with a placeholder in reports.
    pub redact_user: bool,

    /// Skip network checks.
    pub offline: bool,
}

impl Default for RbdiagConfig {
    fn default() -> Self {
        Self {
            ruby: PathBuf::from("ruby"),
            gem: PathBuf::from("gem"),
            sections: Vec::new(),
            spec_dirs: Vec::new(),
            ssl_verify_url: DEFAULT_VERIFY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            redact_user: true,
            offline: false,
        }
    }
}

impl RbdiagConfig {
    /// The configured timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Configured specification directories.
    pub fn spec_dirs(&self) -> Vec<SpecDir> {
        self.spec_dirs
            .iter()
            .map(|d| SpecDir::new(d.location, &d.path))
            .collect()
    }
}

/// A `spec_dirs` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecDirConfig {
    /// Location tag; defaults to `installed`.
    #[serde(default = "default_location")]
    pub location: GemLocation,

    /// Directory holding `.gemspec` files.
    pub path: PathBuf,
}

fn default_location() -> GemLocation {
    GemLocation::Installed
}
