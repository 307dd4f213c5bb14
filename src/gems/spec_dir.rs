//! Gem specification directory scanning.
//!
//! A specification directory holds one `<name>-<version>[-<platform>].gemspec`
//! file per installed gem version. Only the file names are read.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::version::GemVersion;

/// File extension of gem specification files.
pub const GEMSPEC_EXT: &str = ".gemspec";

/// A gem specification file name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSpec {
    /// Gem name (may itself contain dashes).
    pub name: String,
    /// Version as written in the file name.
    pub version: String,
    /// Platform suffix, if the gem is platform-specific.
    pub platform: Option<String>,
}

static SPEC_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)-(?P<version>\d[0-9A-Za-z.]*)(?:-(?P<platform>[A-Za-z_][\w.-]*))?$")
        .expect("SPEC_NAME_REGEX must compile")
});

/// Parse a specification file name.
///
/// `platforms` are platform strings known to the Ruby runtime (for example
/// `x64-mingw-ucrt`); they are stripped first when they match the end of the
/// name. Returns `None` for files that are not `.gemspec` files or that have
/// no recognizable version.
pub fn parse_spec_filename(file_name: &str, platforms: &[String]) -> Option<ParsedSpec> {
    let full = file_name.strip_suffix(GEMSPEC_EXT)?;

    for platform in platforms.iter().filter(|p| !p.is_empty() && *p != "ruby") {
        if let Some(rest) = full.strip_suffix(&format!("-{}", platform)) {
            let (name, version) = rest.rsplit_once('-')?;
            if !GemVersion::looks_like_version(version) {
                return None;
            }
            return Some(ParsedSpec {
                name: name.to_string(),
                version: version.to_string(),
                platform: Some(platform.clone()),
            });
        }
    }

    // The name is the shortest prefix followed by a dash and a digit; what
    // trails the version, if it starts with a letter, is the platform.
    let caps = SPEC_NAME_REGEX.captures(full)?;
    Some(ParsedSpec {
        name: caps["name"].to_string(),
        version: caps["version"].to_string(),
        platform: caps.name("platform").map(|m| m.as_str().to_string()),
    })
}

/// List and parse every specification file in a directory.
///
/// A missing or unreadable directory yields an empty list; entries that do
/// not parse are skipped. The result is in directory order.
pub fn scan_spec_dir(dir: &Path, platforms: &[String]) -> Vec<ParsedSpec> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping spec dir {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut specs = Vec::new();
    for entry in entries.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        match parse_spec_filename(file_name, platforms) {
            Some(spec) => specs.push(spec),
            None if file_name.ends_with(GEMSPEC_EXT) => {
                tracing::warn!("Unrecognized gemspec name: {}", file_name);
            }
            None => {}
        }
    }
    specs
}
