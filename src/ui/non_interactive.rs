//! UI for pipes, redirected output and CI.
//!
//! Plain text only: no colors, no spinners. Status messages go to stderr
//! so that `rbdiag > report.txt` captures nothing but the report.

use crate::report::Report;

use super::{NoopSpinner, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode == OutputMode::Verbose {
            eprintln!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_report(&mut self, report: &Report) {
        print!("{}", report.render());
    }

    fn passthrough(&mut self, stdout: &str, stderr: &str) {
        print!("{}", stdout);
        eprint!("{}", stderr);
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
