//! Fact probes.
//!
//! - [`runtime`] - The Ruby interpreter seam and batch evaluation
//! - [`registry`] - Static table of report probes
//! - [`fact`] - Probe results and missing-value policies
//! - [`env`] - Environment and PATH
//! - [`files`] - Certificate and config path status
//! - [`tls`] - TLS verification against a live endpoint
//! - [`tools`] - Bundled CLI tools and library loads

pub mod env;
pub mod fact;
pub mod files;
pub mod registry;
pub mod runtime;
pub mod tls;
pub mod tools;

pub use env::EnvSnapshot;
pub use fact::{Fact, FactValue, OnMissing, NOT_FOUND};
pub use files::describe_path;
pub use registry::{ProbeDescriptor, ProbeKind, PROBES};
pub use runtime::{FakeRuntime, ProcessRuntime, RubyQuery, RubyRuntime, RuntimeFacts};
pub use tls::{CaSources, TlsOutcome, TlsProbe};
