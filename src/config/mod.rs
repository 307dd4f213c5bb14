//! Configuration loading.
//!
//! - Schema in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layering in [`merger`]
//!
//! # Example
//!
//! ```
//! use rbdiag::config::load_config_file;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "offline: true\nsections: [ruby, ssl]").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! assert!(config.offline);
//! assert_eq!(config.sections, vec!["ruby", "ssl"]);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. User global config (`~/.rbdiag/config.yml`)
//! 2. The file passed with `--config`

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{RbdiagConfig, SpecDirConfig};
