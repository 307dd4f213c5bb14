//! Installed gem inventory across specification directories.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::spec_dir::scan_spec_dir;
use super::version::GemVersion;
use crate::report::section::{ljust, rule};

/// Where a specification directory sits in the RubyGems layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemLocation {
    /// Default gems shipped with Ruby (`Gem.default_specifications_dir`).
    Default,
    /// Gems bundled with Ruby (`Gem.default_dir/specifications`).
    Bundled,
    /// Gems installed into `Gem.dir`.
    Installed,
    /// Gems installed with `--user-install`.
    User,
}

impl GemLocation {
    /// Single-letter tag printed before each gem.
    pub fn tag(&self) -> char {
        match self {
            GemLocation::Default => 'D',
            GemLocation::Bundled => 'B',
            GemLocation::Installed => 'I',
            GemLocation::User => 'U',
        }
    }

    /// Human-readable group title.
    pub fn title(&self) -> &'static str {
        match self {
            GemLocation::Default => "Default Gems",
            GemLocation::Bundled => "Bundled Gems",
            GemLocation::Installed => "Installed Gems",
            GemLocation::User => "User Gems",
        }
    }

    /// Label used in the directory legend.
    pub fn legend(&self) -> &'static str {
        match self {
            GemLocation::Default => "Default",
            GemLocation::Bundled => "Bundled",
            GemLocation::Installed => "Installed",
            GemLocation::User => "User",
        }
    }
}

impl fmt::Display for GemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.legend())
    }
}

/// A candidate specification directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecDir {
    /// Location tag.
    pub location: GemLocation,
    /// Directory holding `.gemspec` files.
    pub path: PathBuf,
}

impl SpecDir {
    /// Create a candidate.
    pub fn new(location: GemLocation, path: impl Into<PathBuf>) -> Self {
        Self {
            location,
            path: path.into(),
        }
    }
}

impl FromStr for SpecDir {
    type Err = String;

    /// Parse `location=path`, or a bare path tagged as installed.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((tag, path)) = s.split_once('=') else {
            return Ok(SpecDir::new(GemLocation::Installed, s));
        };
        let location = match tag.to_ascii_lowercase().as_str() {
            "default" | "d" => GemLocation::Default,
            "bundled" | "b" => GemLocation::Bundled,
            "installed" | "i" => GemLocation::Installed,
            "user" | "u" => GemLocation::User,
            other => return Err(format!("unknown gem location '{}'", other)),
        };
        if path.is_empty() {
            return Err(format!("missing directory after '{}='", tag));
        }
        Ok(SpecDir::new(location, path))
    }
}

/// One installed gem version found in a specification directory.
#[derive(Debug, Clone)]
pub struct GemRecord {
    /// Gem name.
    pub name: String,
    /// Gem version.
    pub version: GemVersion,
    /// Platform suffix, if any.
    pub platform: Option<String>,
    /// Directory the record came from.
    pub location: GemLocation,
}

impl GemRecord {
    /// `version` or `version-platform`.
    pub fn display_version(&self) -> String {
        match &self.platform {
            Some(p) => format!("{}-{}", self.version, p),
            None => self.version.to_string(),
        }
    }
}

/// All versions of one gem in one location.
#[derive(Debug, Clone)]
pub struct GemEntry {
    /// Gem name.
    pub name: String,
    /// Records, newest version first.
    pub records: Vec<GemRecord>,
}

impl GemEntry {
    /// Versions joined by spaces, newest first.
    pub fn versions(&self) -> String {
        self.records
            .iter()
            .map(GemRecord::display_version)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The gems of one specification directory.
#[derive(Debug, Clone)]
pub struct LocationGroup {
    /// Where the directory sits.
    pub location: GemLocation,
    /// The scanned directory.
    pub path: PathBuf,
    /// Entries sorted by name.
    pub entries: Vec<GemEntry>,
}

/// Gem inventory gathered from every candidate directory.
#[derive(Debug, Clone, Default)]
pub struct GemInventory {
    groups: Vec<LocationGroup>,
    /// Number of directories each gem name appears in.
    multiplicity: HashMap<String, usize>,
}

impl GemInventory {
    /// Scan candidate directories in order.
    ///
    /// A directory listed twice (after resolving symlinks) is only scanned for
    /// its first location, so one physical directory never marks its gems as
    /// duplicates of themselves.
    pub fn collect(candidates: &[SpecDir], platforms: &[String]) -> Self {
        let mut inventory = GemInventory::default();
        let mut seen: Vec<PathBuf> = Vec::new();

        for candidate in candidates {
            let canonical = canonical(&candidate.path);
            let entries = if seen.contains(&canonical) {
                tracing::debug!(
                    "{} dir {} already scanned",
                    candidate.location,
                    candidate.path.display()
                );
                Vec::new()
            } else {
                seen.push(canonical);
                group_by_name(candidate, platforms)
            };

            for entry in &entries {
                *inventory.multiplicity.entry(entry.name.clone()).or_insert(0) += 1;
            }

            inventory.groups.push(LocationGroup {
                location: candidate.location,
                path: candidate.path.clone(),
                entries,
            });
        }

        inventory
    }

    /// Groups in candidate order.
    pub fn groups(&self) -> &[LocationGroup] {
        &self.groups
    }

    /// Whether a gem name appears in more than one directory.
    pub fn is_duplicate(&self, name: &str) -> bool {
        self.multiplicity.get(name).copied().unwrap_or(0) > 1
    }

    /// Whether no directory held any gem.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Total number of gem versions found.
    pub fn record_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.entries)
            .map(|e| e.records.len())
            .sum()
    }

    /// Render the inventory body (without the section heading).
    ///
    /// Each group opens with a ruled title; rows are
    /// `<tag>  <name padded to 25> [*] <versions>` with a blank line after
    /// every five rows.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for group in &self.groups {
            if matches!(group.location, GemLocation::Default) {
                continue;
            }
            lines.push(format!(
                "{}{}",
                ljust(group.location.legend(), 10),
                group.path.display()
            ));
        }
        lines.push("* gem exists in multiple locations".to_string());
        lines.push(String::new());

        for group in &self.groups {
            let title = group.location.title();
            lines.push(format!(
                "{} {} {}",
                rule(12),
                title,
                rule(24usize.saturating_sub(title.len()))
            ));

            for (i, entry) in group.entries.iter().enumerate() {
                let marker = if self.is_duplicate(&entry.name) {
                    '*'
                } else {
                    ' '
                };
                lines.push(format!(
                    "{}  {} {} {}",
                    group.location.tag(),
                    ljust(&entry.name, 25),
                    marker,
                    entry.versions()
                ));
                if (i + 1) % 5 == 0 {
                    lines.push(String::new());
                }
            }

            while lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
            lines.push(String::new());
        }

        lines
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn group_by_name(candidate: &SpecDir, platforms: &[String]) -> Vec<GemEntry> {
    let mut by_name: BTreeMap<String, Vec<GemRecord>> = BTreeMap::new();

    for spec in scan_spec_dir(&candidate.path, platforms) {
        by_name.entry(spec.name.clone()).or_default().push(GemRecord {
            name: spec.name,
            version: GemVersion::parse(&spec.version),
            platform: spec.platform,
            location: candidate.location,
        });
    }

    by_name
        .into_iter()
        .map(|(name, mut records)| {
            records.sort_by(|a, b| {
                b.version
                    .cmp(&a.version)
                    .then_with(|| a.platform.cmp(&b.platform))
            });
            GemEntry { name, records }
        })
        .collect()
}
