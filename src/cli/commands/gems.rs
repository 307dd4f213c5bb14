//! The `rbdiag gems` command.

use crate::cli::args::GemsArgs;
use crate::config::RbdiagConfig;
use crate::error::Result;
use crate::report::DiagnosticReporter;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::report::report_context;

/// Lists installed gems grouped by location, flagging duplicates.
pub struct GemsCommand {
    reporter: DiagnosticReporter,
}

impl GemsCommand {
    /// Create a gems command.
    pub fn new(config: &RbdiagConfig, args: &GemsArgs) -> Self {
        let ctx = report_context(config, &args.spec_dirs, config.redact_user, None);
        Self::with_reporter(DiagnosticReporter::new(ctx))
    }

    /// Create a gems command around an existing reporter.
    pub fn with_reporter(reporter: DiagnosticReporter) -> Self {
        Self { reporter }
    }
}

impl Command for GemsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let inventory = self.reporter.gem_inventory();
        if inventory.is_empty() {
            ui.warning("No installed gems found");
            return Ok(CommandResult::success());
        }

        let mut text = inventory.render_lines().join("\n");
        text.push('\n');
        ui.passthrough(&self.reporter.redact(&text), "");
        ui.success(&format!("{} gem versions", inventory.record_count()));
        Ok(CommandResult::success())
    }
}
