//! The `rbdiag gem` command.

use crate::cli::args::GemArgs;
use crate::config::RbdiagConfig;
use crate::error::Result;
use crate::probe::ProcessRuntime;
use crate::ui::UserInterface;
use crate::wrapper::{GemDispatcher, GemWrapper, ProcessDispatcher};

use super::dispatcher::{Command, CommandResult};

/// Runs a gem sub-command through [`GemWrapper`].
pub struct GemCommand {
    wrapper: GemWrapper,
    line: String,
}

impl GemCommand {
    /// Create a gem command.
    pub fn new(config: &RbdiagConfig, args: &GemArgs) -> Self {
        let dispatcher = ProcessDispatcher::new(&config.gem)
            .with_runtime(ProcessRuntime::new(&config.ruby, config.timeout()));
        Self::with_dispatcher(Box::new(dispatcher), args.command.join(" "))
    }

    /// Create a gem command with a specific dispatcher.
    pub fn with_dispatcher(dispatcher: Box<dyn GemDispatcher>, line: impl Into<String>) -> Self {
        Self {
            wrapper: GemWrapper::new(dispatcher),
            line: line.into(),
        }
    }
}

impl Command for GemCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let output = self.wrapper.run(&self.line)?;
        ui.passthrough(&output.stdout, &output.stderr);

        if output.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
