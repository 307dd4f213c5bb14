//! Configuration file discovery and loading.

use crate::config::merger::merge_configs;
use crate::config::schema::RbdiagConfig;
use crate::error::{RbdiagError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration files in merge order (later overrides earlier).
///
/// 1. User global config (`~/.rbdiag/config.yml`)
/// 2. The file named with `--config`
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `~/.rbdiag/config.yml`, when it exists.
    pub user_global: Option<PathBuf>,

    /// Explicitly requested file. It must exist.
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover the user config and record an explicit path.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::home_dir()?.join(".rbdiag").join("config.yml");
        path.exists().then_some(path)
    }

    /// All paths to load, in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.explicit.iter()).collect()
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RbdiagConfig> {
    let content = read(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into an [`RbdiagConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<RbdiagConfig> {
    if content.trim().is_empty() {
        return Ok(RbdiagConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| RbdiagError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    serde_yaml::from_str(&content).map_err(|e| RbdiagError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every file in `paths`.
///
/// With no files at all, the defaults are returned.
pub fn load_merged_config(paths: &ConfigPaths) -> Result<RbdiagConfig> {
    let layers = paths
        .all()
        .into_iter()
        .map(|path| {
            tracing::debug!("Loading config from {}", path.display());
            load_config_value(path)
        })
        .collect::<Result<Vec<_>>>()?;

    let merged = merge_configs(&layers);
    let source = paths
        .explicit
        .clone()
        .or_else(|| paths.user_global.clone())
        .unwrap_or_default();

    serde_yaml::from_value(merged).map_err(|e| RbdiagError::ConfigParseError {
        path: source,
        message: e.to_string(),
    })
}

/// Load the user config merged with an optional explicit file.
pub fn load_config(explicit: Option<&Path>) -> Result<RbdiagConfig> {
    load_merged_config(&ConfigPaths::discover(explicit))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RbdiagError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RbdiagError::Io(e)
        }
    })
}
