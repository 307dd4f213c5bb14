//! Installed gem discovery.
//!
//! - [`version`] - RubyGems-compatible version ordering
//! - [`spec_dir`] - Specification file name parsing and directory scanning
//! - [`inventory`] - Grouping by location, duplicate detection, rendering

pub mod inventory;
pub mod spec_dir;
pub mod version;

pub use inventory::{GemEntry, GemInventory, GemLocation, GemRecord, LocationGroup, SpecDir};
pub use spec_dir::{parse_spec_filename, scan_spec_dir, ParsedSpec};
pub use version::GemVersion;
