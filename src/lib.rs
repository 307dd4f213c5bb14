//! rbdiag - Ruby installation diagnostics.
//!
//! rbdiag inspects a Ruby installation from the outside and prints a
//! column-aligned report covering the environment, the interpreter build,
//! bundled libraries, OpenSSL and certificate verification, RubyGems
//! settings, command-line tools, and installed gems. It also wraps the `gem`
//! command to explain a few confusing failures.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and merging
//! - [`error`] - Error types and result aliases
//! - [`gems`] - Gem specification scanning and the installed gem inventory
//! - [`probe`] - Fact probes and the Ruby runtime seam
//! - [`report`] - Report sections and the diagnostic reporter
//! - [`shell`] - Process execution
//! - [`ui`] - Terminal output, themes, and spinners
//! - [`wrapper`] - The gem command wrapper
//!
//! # Example
//!
//! ```
//! use rbdiag::probe::{EnvSnapshot, FakeRuntime, TlsProbe};
//! use rbdiag::report::{parse_selection, DiagnosticReporter, ReportContext};
//! use std::time::Duration;
//!
//! let reporter = DiagnosticReporter::new(ReportContext {
//!     runtime: Box::new(FakeRuntime::new()),
//!     env: EnvSnapshot::from_vars([("PATH", "/usr/bin")]),
//!     tls: TlsProbe::new("https://example.invalid/", Duration::from_secs(1), true),
//!     spec_dirs: Vec::new(),
//!     redact_user: false,
//!     tool_timeout: Duration::from_secs(1),
//! });
//! let text = reporter.generate(&parse_selection(&["path"]));
//! assert!(text.contains("/usr/bin"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod gems;
pub mod probe;
pub mod report;
pub mod shell;
pub mod ui;
pub mod wrapper;

pub use error::{RbdiagError, Result};
