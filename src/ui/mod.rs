//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes and CI
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use rbdiag::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! let mut spinner = ui.start_spinner("Gathering facts");
//! spinner.finish_clear();
//! ui.success("Report written");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, RbdiagTheme};

use crate::report::Report;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Print a diagnostic report. Reports are printed in every output mode.
    fn show_report(&mut self, report: &Report);

    /// Forward a child command's output unchanged.
    fn passthrough(&mut self, stdout: &str, stderr: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Remove the spinner without a final message.
    fn finish_clear(&mut self);
}

/// A spinner that does nothing.
#[derive(Debug, Default)]
pub struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_clear(&mut self) {}
}
