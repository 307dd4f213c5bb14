//! Diagnostic report generation.
//!
//! - [`kind`] - Section kinds, canonical order, and selection parsing
//! - [`section`] - Column-aligned section text
//! - [`format`] - Layout of multi-line values
//! - [`reporter`] - Assembling sections from probes

pub mod format;
pub mod kind;
pub mod reporter;
pub mod section;

pub use kind::{effective_selection, parse_selection, SectionKind};
pub use reporter::{DiagnosticReporter, Report, ReportContext};
pub use section::ReportSection;
