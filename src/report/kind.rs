//! Report section kinds and selection parsing.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A section of the diagnostic report.
///
/// The declaration order is the canonical output order; `Ord` follows it so a
/// `BTreeSet<SectionKind>` iterates in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Process environment variables.
    Env,
    /// PATH entries.
    Path,
    /// Ruby's default encodings.
    Encodings,
    /// Interpreter description and build configuration.
    Ruby,
    /// Standard library and extension versions.
    Libraries,
    /// OpenSSL configuration and TLS verification.
    Ssl,
    /// RubyGems directory settings.
    GemSettings,
    /// Output of `gem environment`.
    GemEnv,
    /// Bundled command-line tools.
    CliTools,
    /// Installed gems by location.
    GemList,
}

impl SectionKind {
    /// Every section, in canonical order.
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Env,
        SectionKind::Path,
        SectionKind::Encodings,
        SectionKind::Ruby,
        SectionKind::Libraries,
        SectionKind::Ssl,
        SectionKind::GemSettings,
        SectionKind::GemEnv,
        SectionKind::CliTools,
        SectionKind::GemList,
    ];

    /// The selection name used on the command line and in config.
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Env => "env",
            SectionKind::Path => "path",
            SectionKind::Encodings => "encodings",
            SectionKind::Ruby => "ruby",
            SectionKind::Libraries => "libs",
            SectionKind::Ssl => "ssl",
            SectionKind::GemSettings => "gem_settings",
            SectionKind::GemEnv => "gem_env",
            SectionKind::CliTools => "cli",
            SectionKind::GemList => "gem_list",
        }
    }

    /// The heading printed above the section.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Env => "ENV",
            SectionKind::Path => "Path",
            SectionKind::Encodings => "Encodings",
            SectionKind::Ruby => "Ruby Info",
            SectionKind::Libraries => "Libraries",
            SectionKind::Ssl => "OpenSSL",
            SectionKind::GemSettings => "Gem Settings",
            SectionKind::GemEnv => "Gem Environment",
            SectionKind::CliTools => "CLI Test",
            SectionKind::GemList => "Installed Gems",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "env" => Ok(Self::Env),
            "path" => Ok(Self::Path),
            "encodings" => Ok(Self::Encodings),
            "ruby" | "ruby_info" => Ok(Self::Ruby),
            "libs" | "libraries" => Ok(Self::Libraries),
            "ssl" | "openssl" => Ok(Self::Ssl),
            "gem_settings" => Ok(Self::GemSettings),
            "gem_env" | "gem_environment" => Ok(Self::GemEnv),
            "cli" | "cli_tools" => Ok(Self::CliTools),
            "gem_list" => Ok(Self::GemList),
            _ => Err(format!("unknown section: {}", s)),
        }
    }
}

/// Resolve a list of section names into a selection.
///
/// `all` selects every section and `gem` expands to the gem settings, gem
/// environment and gem list. Unknown names are ignored with a warning. An empty result means
/// "all sections".
pub fn parse_selection<S: AsRef<str>>(names: &[S]) -> BTreeSet<SectionKind> {
    let mut selection = BTreeSet::new();

    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        match name.to_lowercase().as_str() {
            "all" => selection.extend(SectionKind::ALL),
            "gem" | "gems" => {
                selection.insert(SectionKind::GemSettings);
                selection.insert(SectionKind::GemEnv);
                selection.insert(SectionKind::GemList);
            }
            _ => match name.parse::<SectionKind>() {
                Ok(kind) => {
                    selection.insert(kind);
                }
                Err(e) => tracing::warn!("Ignoring {}", e),
            },
        }
    }

    selection
}

/// Expand an empty selection to every section.
pub fn effective_selection(selection: &BTreeSet<SectionKind>) -> Vec<SectionKind> {
    if selection.is_empty() {
        SectionKind::ALL.to_vec()
    } else {
        selection.iter().copied().collect()
    }
}
