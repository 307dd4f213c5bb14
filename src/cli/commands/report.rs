//! The `rbdiag report` command.

use std::collections::BTreeSet;

use crate::cli::args::ReportArgs;
use crate::config::RbdiagConfig;
use crate::error::Result;
use crate::gems::SpecDir;
use crate::probe::{EnvSnapshot, ProcessRuntime, TlsProbe};
use crate::report::{parse_selection, DiagnosticReporter, ReportContext, SectionKind};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Build the reporter inputs from configuration.
///
/// `spec_dirs` given on the command line replace the configured ones.
pub(crate) fn report_context(
    config: &RbdiagConfig,
    spec_dirs: &[SpecDir],
    redact_user: bool,
    ssl_url: Option<&str>,
) -> ReportContext {
    let timeout = config.timeout();
    let spec_dirs = if spec_dirs.is_empty() {
        config.spec_dirs()
    } else {
        spec_dirs.to_vec()
    };

    ReportContext {
        runtime: Box::new(ProcessRuntime::new(&config.ruby, timeout)),
        env: EnvSnapshot::capture(),
        tls: TlsProbe::new(
            ssl_url.unwrap_or(&config.ssl_verify_url),
            timeout,
            config.offline,
        ),
        spec_dirs,
        redact_user,
        tool_timeout: timeout,
    }
}

/// The report command implementation.
pub struct ReportCommand {
    reporter: DiagnosticReporter,
    selection: BTreeSet<SectionKind>,
}

impl ReportCommand {
    /// Create a report command from configuration and arguments.
    pub fn new(config: &RbdiagConfig, args: &ReportArgs) -> Self {
        let names = if args.sections.is_empty() {
            &config.sections
        } else {
            &args.sections
        };
        let ctx = report_context(
            config,
            &args.spec_dirs,
            config.redact_user && !args.no_redact,
            args.ssl_url.as_deref(),
        );
        Self::with_reporter(DiagnosticReporter::new(ctx), parse_selection(names.as_slice()))
    }

    /// Create a report command around an existing reporter.
    pub fn with_reporter(reporter: DiagnosticReporter, selection: BTreeSet<SectionKind>) -> Self {
        Self {
            reporter,
            selection,
        }
    }
}

impl Command for ReportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Gathering Ruby diagnostics...");
        let report = self.reporter.build(&self.selection);
        spinner.finish_clear();

        ui.show_report(&report);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::FakeRuntime;
    use crate::ui::MockUI;
    use std::time::Duration;

    fn reporter(runtime: FakeRuntime) -> DiagnosticReporter {
        DiagnosticReporter::new(ReportContext {
            runtime: Box::new(runtime),
            env: EnvSnapshot::from_vars([("PATH", "/usr/local/bin:/usr/bin")]),
            tls: TlsProbe::new("https://example.invalid/", Duration::from_secs(1), true),
            spec_dirs: Vec::new(),
            redact_user: false,
            tool_timeout: Duration::from_secs(1),
        })
    }

    #[test]
    fn prints_selected_sections() {
        let cmd = ReportCommand::with_reporter(
            reporter(FakeRuntime::new()),
            parse_selection(&["path"]),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.reports().len(), 1);
        let text = &ui.reports()[0];
        assert!(text.contains(" Path\n"));
        assert!(text.contains("/usr/local/bin\n"));
        assert!(!text.contains(" Ruby Info\n"));
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn unavailable_ruby_still_succeeds() {
        let cmd = ReportCommand::with_reporter(
            reporter(FakeRuntime::unavailable()),
            parse_selection(&["ruby", "libs"]),
        );
        let mut ui = MockUI::new();
        assert!(cmd.execute(&mut ui).unwrap().success);
        assert!(ui.reports()[0].contains("NOT FOUND!"));
    }

    #[test]
    fn arguments_override_configured_sections() {
        let config = RbdiagConfig {
            sections: vec!["env".to_string()],
            offline: true,
            ruby: "/nonexistent/rbdiag-test/ruby".into(),
            ..Default::default()
        };
        let args = ReportArgs {
            sections: vec!["path".to_string()],
            ..Default::default()
        };
        let cmd = ReportCommand::new(&config, &args);
        assert_eq!(cmd.selection, parse_selection(&["path"]));

        let cmd = ReportCommand::new(&config, &ReportArgs::default());
        assert_eq!(cmd.selection, parse_selection(&["env"]));
    }
}
