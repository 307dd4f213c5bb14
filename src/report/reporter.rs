//! Report assembly.
//!
//! [`DiagnosticReporter`] walks the requested sections in canonical order,
//! evaluates every Ruby-backed probe in a single interpreter run, and lays
//! the results out as [`ReportSection`]s. No probe failure escapes: missing
//! libraries, files, and network access all degrade to placeholder text.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::gems::{GemInventory, GemLocation, GemVersion, SpecDir};
use crate::probe::env::{env_section, path_section};
use crate::probe::registry::{keys, probes_for, queries_for, ProbeDescriptor, ProbeKind};
use crate::probe::tls::supported_protocols;
use crate::probe::tools::{check_tool, require_result, ToolContext, CLI_TOOLS, CLI_WIDTH, REQUIRE_TESTS};
use crate::probe::{
    describe_path, CaSources, EnvSnapshot, Fact, FactValue, OnMissing, RubyRuntime, RuntimeFacts,
    TlsOutcome, TlsProbe,
};

use super::format::{configure_arg_lines, signal_rows};
use super::kind::{effective_selection, SectionKind};
use super::section::{ljust, rule, ReportSection, LIST_LABEL_WIDTH, RULE_WIDTH};

/// Placeholder substituted for the login name.
pub const USER_PLACEHOLDER: &str = "<user>";

/// Everything a report run needs, passed explicitly.
pub struct ReportContext {
    /// The interpreter under diagnosis.
    pub runtime: Box<dyn RubyRuntime>,
    /// Process environment snapshot.
    pub env: EnvSnapshot,
    /// TLS verification probe.
    pub tls: TlsProbe,
    /// Explicit spec directories; when empty they are discovered.
    pub spec_dirs: Vec<SpecDir>,
    /// Replace the login name with a placeholder.
    pub redact_user: bool,
    /// Timeout for each CLI tool check.
    pub tool_timeout: Duration,
}

/// A generated report.
#[derive(Debug, Clone)]
pub struct Report {
    sections: Vec<ReportSection>,
}

impl Report {
    /// The sections, in output order.
    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// The opening banner lines.
    pub fn banner() -> Vec<String> {
        vec![
            rule(RULE_WIDTH),
            format!("rbdiag v{}", env!("CARGO_PKG_VERSION")),
            String::new(),
        ]
    }

    /// The closing line.
    pub fn footer() -> String {
        rule(RULE_WIDTH)
    }

    /// Render the whole report as plain text.
    pub fn render(&self) -> String {
        self.render_styled(|s| s.to_string(), |s| s.to_string())
    }

    /// Render with section headings and emphasized lines styled.
    pub fn render_styled<H, E>(&self, heading: H, emphasis: E) -> String
    where
        H: Fn(&str) -> String,
        E: Fn(&str) -> String,
    {
        let mut out = Report::banner().join("\n");
        out.push('\n');
        for section in &self.sections {
            out.push_str(&section.render_styled(&heading, &emphasis));
        }
        out.push_str(&Report::footer());
        out.push('\n');
        out
    }
}

/// Produces diagnostic reports for one Ruby installation.
pub struct DiagnosticReporter {
    ctx: ReportContext,
    tls_outcome: OnceCell<TlsOutcome>,
}

impl DiagnosticReporter {
    /// Create a reporter.
    pub fn new(ctx: ReportContext) -> Self {
        Self {
            ctx,
            tls_outcome: OnceCell::new(),
        }
    }

    /// Generate the report text for `selection` (empty means everything).
    pub fn generate(&self, selection: &BTreeSet<SectionKind>) -> String {
        self.build(selection).render()
    }

    /// Build the report sections for `selection`.
    pub fn build(&self, selection: &BTreeSet<SectionKind>) -> Report {
        let kinds = effective_selection(selection);
        let wanted: BTreeSet<SectionKind> = kinds.iter().copied().collect();
        let facts = self.gather(&wanted);

        let mut sections: Vec<ReportSection> = kinds
            .iter()
            .map(|kind| {
                tracing::debug!("Building section {}", kind);
                self.section(*kind, &facts)
            })
            .collect();

        if let Some(user) = self.redacted_user() {
            for section in &mut sections {
                section.redact(user, USER_PLACEHOLDER);
            }
        }

        Report { sections }
    }

    /// Replace the login name in free text, when redaction is enabled.
    pub fn redact(&self, text: &str) -> String {
        match self.redacted_user() {
            Some(user) => text.replace(user, USER_PLACEHOLDER),
            None => text.to_string(),
        }
    }

    /// Names shorter than three characters match too much unrelated text.
    fn redacted_user(&self) -> Option<&str> {
        if !self.ctx.redact_user {
            return None;
        }
        self.ctx.env.user().filter(|u| u.len() >= 3)
    }

    /// Collect the installed gem inventory.
    pub fn gem_inventory(&self) -> GemInventory {
        let wanted: BTreeSet<SectionKind> = [SectionKind::GemList].into_iter().collect();
        let facts = self.gather(&wanted);
        self.inventory(&facts)
    }

    fn gather(&self, sections: &BTreeSet<SectionKind>) -> RuntimeFacts {
        let needs_ruby = sections
            .iter()
            .any(|k| !matches!(k, SectionKind::Env | SectionKind::Path));
        if !needs_ruby {
            return RuntimeFacts::new();
        }

        let queries = queries_for(sections);
        match self.ctx.runtime.evaluate(&queries) {
            Ok(facts) => {
                tracing::debug!(
                    "{} answered {} of {} queries",
                    self.ctx.runtime.describe(),
                    facts.len(),
                    queries.len()
                );
                facts
            }
            Err(e) => {
                tracing::warn!("{}; Ruby facts are unavailable", e);
                RuntimeFacts::new()
            }
        }
    }

    fn section(&self, kind: SectionKind, facts: &RuntimeFacts) -> ReportSection {
        match kind {
            SectionKind::Env => env_section(&self.ctx.env),
            SectionKind::Path => path_section(&self.ctx.env),
            SectionKind::CliTools => self.cli_section(facts),
            SectionKind::GemList => self.gem_list_section(facts),
            _ => self.probe_section(kind, facts),
        }
    }

    fn probe_section(&self, kind: SectionKind, facts: &RuntimeFacts) -> ReportSection {
        let mut section = ReportSection::new(kind, LIST_LABEL_WIDTH);
        for probe in probes_for(kind) {
            let parent_missing = probe
                .parent
                .is_some_and(|parent| !facts.fact(parent).is_found());
            if parent_missing {
                continue;
            }
            self.render_probe(&mut section, probe, facts);
        }
        section
    }

    fn render_probe(&self, section: &mut ReportSection, probe: &ProbeDescriptor, facts: &RuntimeFacts) {
        let value = facts.get(probe.key);
        let row = |section: &mut ReportSection, text: &str| {
            section.indented_row(probe.indent, probe.label, text, probe.label_width)
        };

        match probe.kind {
            ProbeKind::Blank => section.blank(),
            ProbeKind::Value => {
                if let Some(text) = resolve(probe, value) {
                    row(section, &text);
                }
            }
            ProbeKind::Headline => {
                if let Some(text) = resolve(probe, value) {
                    section.headline(text);
                }
            }
            ProbeKind::Pair {
                key2,
                label2,
                value_width,
                label2_width,
                ..
            } => match Fact::from_optional(value) {
                Fact::Found(first) => {
                    let second = facts
                        .value(key2)
                        .unwrap_or_else(|| probe.on_missing.placeholder().unwrap_or("").to_string());
                    let text = format!(
                        "{}{}{}",
                        ljust(&first, value_width),
                        ljust(label2, label2_width),
                        second
                    );
                    row(section, &text);
                }
                Fact::Unavailable => {
                    if let Some(placeholder) = probe.on_missing.placeholder() {
                        row(section, placeholder);
                    }
                }
            },
            ProbeKind::Path => match value {
                Some(FactValue::Value(path)) => self.path_rows(section, probe, Some(path.as_str())),
                Some(FactValue::Nil) => self.path_rows(section, probe, None),
                _ => {
                    if let Some(placeholder) = probe.on_missing.placeholder() {
                        row(section, placeholder);
                    }
                }
            },
            ProbeKind::EnvPath => {
                self.path_rows(section, probe, self.ctx.env.get(probe.expression));
            }
            ProbeKind::ConfigureArgs | ProbeKind::Signals => match Fact::from_optional(value) {
                Fact::Found(text) => {
                    section.raw(probe.label);
                    let lines = if probe.kind == ProbeKind::Signals {
                        signal_rows(&text)
                    } else {
                        configure_arg_lines(&text)
                    };
                    for line in lines {
                        section.raw(line);
                    }
                }
                Fact::Unavailable => {
                    if let Some(placeholder) = probe.on_missing.placeholder() {
                        row(section, placeholder);
                    }
                }
            },
            ProbeKind::Listing => match Fact::from_optional(value) {
                Fact::Found(text) => {
                    if !probe.label.is_empty() {
                        section.raw(format!("{} {}", rule(RULE_WIDTH - 10), probe.label));
                    }
                    for line in text.trim_end().lines() {
                        section.raw(line);
                    }
                }
                Fact::Unavailable => {
                    if let Some(placeholder) = probe.on_missing.placeholder() {
                        row(section, placeholder);
                    }
                }
            },
            ProbeKind::TlsVerify => {
                let outcome = self.tls_outcome(facts);
                row(section, &outcome.message());
            }
            ProbeKind::TlsProtocols => row(section, &supported_protocols()),
        }
    }

    fn path_rows(&self, section: &mut ReportSection, probe: &ProbeDescriptor, path: Option<&str>) {
        for (i, line) in describe_path(path).into_iter().enumerate() {
            let label = if i == 0 { probe.label } else { "" };
            section.indented_row(probe.indent, label, &line, probe.label_width);
        }
    }

    fn tls_outcome(&self, facts: &RuntimeFacts) -> &TlsOutcome {
        self.tls_outcome.get_or_init(|| {
            let env = &self.ctx.env;
            let mut sources = CaSources::default();
            sources.files.extend(env.get("SSL_CERT_FILE").map(PathBuf::from));
            sources.files.extend(facts.value("default_cert_file").map(PathBuf::from));
            sources.dirs.extend(env.get("SSL_CERT_DIR").map(PathBuf::from));
            sources.dirs.extend(facts.value("default_cert_dir").map(PathBuf::from));
            self.ctx.tls.verify(&sources)
        })
    }

    fn tool_context(&self, facts: &RuntimeFacts) -> ToolContext {
        ToolContext {
            bindir: facts.value(keys::RUBY_BINDIR).map(PathBuf::from),
            ruby_version: facts.value(keys::RUBY_VERSION).map(|v| GemVersion::parse(&v)),
            windows: facts
                .value(keys::HOST_PLATFORM)
                .is_some_and(|p| p.contains("mingw") || p.contains("mswin")),
            timeout: Some(self.ctx.tool_timeout),
        }
    }

    fn cli_section(&self, facts: &RuntimeFacts) -> ReportSection {
        let mut section = ReportSection::new(SectionKind::CliTools, CLI_WIDTH);
        let tools = self.tool_context(facts);

        let cli: Vec<String> = CLI_TOOLS.iter().map(|t| check_tool(t, &tools)).collect();
        let loads: Vec<String> = REQUIRE_TESTS
            .iter()
            .filter_map(|t| require_result(t, facts, &tools))
            .collect();

        section.row("Command   Version", "Require Test");
        for i in 0..cli.len().max(loads.len()) {
            let left = cli.get(i).cloned().unwrap_or_else(|| ljust("", CLI_WIDTH));
            let right = loads.get(i).map(String::as_str).unwrap_or("");
            section.raw(format!("{}{}", left, right).trim_end().to_string());
        }
        section
    }

    fn spec_dirs(&self, facts: &RuntimeFacts) -> Vec<SpecDir> {
        if !self.ctx.spec_dirs.is_empty() {
            return self.ctx.spec_dirs.clone();
        }
        [
            (GemLocation::Default, keys::DEFAULT_SPEC_DIR),
            (GemLocation::Bundled, keys::BUNDLED_SPEC_DIR),
            (GemLocation::Installed, keys::INSTALLED_SPEC_DIR),
            (GemLocation::User, keys::USER_SPEC_DIR),
        ]
        .into_iter()
        .filter_map(|(location, key)| facts.value(key).map(|dir| SpecDir::new(location, dir)))
        .collect()
    }

    fn inventory(&self, facts: &RuntimeFacts) -> GemInventory {
        let platforms: Vec<String> = facts
            .value(keys::GEM_PLATFORMS)
            .map(|p| p.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        GemInventory::collect(&self.spec_dirs(facts), &platforms)
    }

    fn gem_list_section(&self, facts: &RuntimeFacts) -> ReportSection {
        let mut section = ReportSection::new(SectionKind::GemList, 0);
        let inventory = self.inventory(facts);
        if inventory.is_empty() {
            section.raw("No installed gems found");
            return section;
        }
        for line in inventory.render_lines() {
            section.raw(line);
        }
        section
    }
}

/// The display text for a single-value probe, or `None` to omit the line.
fn resolve(probe: &ProbeDescriptor, value: Option<&FactValue>) -> Option<String> {
    if matches!(value, Some(FactValue::Nil)) && probe.on_missing == OnMissing::Omit {
        return None;
    }
    match Fact::from_optional(value) {
        Fact::Found(text) => Some(text),
        Fact::Unavailable => probe.on_missing.placeholder().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::FakeRuntime;
    use std::fs;
    use tempfile::TempDir;

    fn context(runtime: FakeRuntime) -> ReportContext {
        ReportContext {
            runtime: Box::new(runtime),
            env: EnvSnapshot::from_vars([("PATH", "/usr/bin"), ("USER", "devuser")]),
            tls: TlsProbe::new("https://example.invalid/", Duration::from_secs(1), true),
            spec_dirs: Vec::new(),
            redact_user: true,
            tool_timeout: Duration::from_secs(5),
        }
    }

    fn select(kinds: &[SectionKind]) -> BTreeSet<SectionKind> {
        kinds.iter().copied().collect()
    }

    #[test]
    fn sections_appear_in_canonical_order() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::new()));
        let text = reporter.generate(&select(&[SectionKind::GemSettings, SectionKind::Path]));
        let path = text.find(" Path\n").unwrap();
        let gems = text.find(" Gem Settings\n").unwrap();
        assert!(path < gems);
        assert!(!text.contains(" ENV\n"));
    }

    #[test]
    fn empty_selection_renders_everything() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::unavailable()));
        let report = reporter.build(&BTreeSet::new());
        let kinds: Vec<_> = report.sections().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn missing_library_shows_not_found() {
        let runtime = FakeRuntime::new()
            .with_value("gem_version", "3.5.3")
            .with_load_error("bundler_version");
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::Libraries]));
        assert!(text.contains(&format!("{}3.5.3", ljust("Gem::VERSION", 17))));
        assert!(text.contains(&format!("{}NOT FOUND!", ljust("Bundler::VERSION", 17))));
        assert!(text.contains(&format!("{}Unknown", ljust("Integer::GMP_VERSION", 26))));
        assert!(!text.contains("Readline::VERSION"));
    }

    #[test]
    fn pair_probe_renders_both_columns() {
        let runtime = FakeRuntime::new()
            .with_value("psych_version", "5.1.2")
            .with_value("libyaml_version", "0.2.5");
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::Libraries]));
        let expected = format!(
            "{}{}{}0.2.5",
            ljust("Psych::VERSION", 26),
            ljust("5.1.2", 14),
            ljust("LIBYAML_VERSION", 17)
        );
        assert!(text.contains(&expected));
    }

    #[test]
    fn missing_openssl_emits_only_parent_line() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::new().with_load_error("openssl_version")));
        let report = reporter.build(&select(&[SectionKind::Ssl]));
        let lines = report.sections()[0].lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("OpenSSL::VERSION"));
        assert!(lines[0].ends_with("NOT FOUND!"));
    }

    #[test]
    fn openssl_children_render_when_parent_found() {
        let temp = TempDir::new().unwrap();
        let cert = temp.path().join("missing.pem").to_string_lossy().to_string();
        let runtime = FakeRuntime::new()
            .with_value("openssl_version", "3.2.0")
            .with_value("openssl_library", "OpenSSL 3.0.13 30 Jan 2024")
            .with_value("default_cert_file", &cert);
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::Ssl]));

        assert!(text.contains("    SSL Verify"));
        assert!(text.contains("skipped (offline)"));
        assert!(text.contains(&format!("{}Not Defined", ljust("    OPENSSL_LIBRARY_VERSION", 34))));
        assert!(text.contains("File Not Found!"));
        assert!(text.contains(&cert));
        assert!(text.contains(&format!("{}No ENV key", ljust("    ENV['SSL_CERT_FILE']", 34))));
    }

    #[test]
    fn nil_values_print_nil_unless_omitted() {
        let runtime = FakeRuntime::new()
            .with_value("ruby_description", "ruby 3.3.0 (2023-12-25 revision 5124f9ac75) [x86_64-linux]")
            .with_nil("libruby_soname")
            .with_nil("ruby_build_info");
        let reporter = DiagnosticReporter::new(context(runtime));
        let report = reporter.build(&select(&[SectionKind::Ruby]));
        let section = &report.sections()[0];

        assert!(section.is_emphasized(0));
        assert!(section
            .lines()
            .iter()
            .any(|l| l == &format!("{}nil", ljust("RbConfig::CONFIG['LIBRUBY_SONAME']:", 36))));
        assert!(!section.lines().iter().any(|l| l.contains("Build Type/Info")));
    }

    #[test]
    fn configure_args_are_split() {
        let runtime = FakeRuntime::new().with_value("configure_args", "--prefix=/opt/ruby --enable-shared");
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::Ruby]));
        assert!(text.contains("RbConfig::CONFIG['configure_args']:\n  --prefix=/opt/ruby\n  --enable-shared\n"));
    }

    #[test]
    fn load_path_is_listed_under_its_own_heading() {
        let runtime = FakeRuntime::new().with_value(
            "load_path",
            "/opt/ruby/lib/ruby/site_ruby/3.3.0\n/opt/ruby/lib/ruby/3.3.0\n",
        );
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::Ruby]));
        let heading = format!("{} $LOAD_PATH", rule(RULE_WIDTH - 10));
        assert!(text.contains(&format!(
            "{}\n/opt/ruby/lib/ruby/site_ruby/3.3.0\n/opt/ruby/lib/ruby/3.3.0\n",
            heading
        )));
    }

    #[test]
    fn load_path_is_omitted_when_unavailable() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::new()));
        let text = reporter.generate(&select(&[SectionKind::Ruby]));
        assert!(!text.contains("$LOAD_PATH"));
    }

    #[test]
    fn gem_environment_is_printed_line_by_line() {
        let runtime = FakeRuntime::new().with_value(
            "gem_environment",
            "RubyGems Environment:\n  - RUBYGEMS VERSION: 3.5.3\n  - RUBY VERSION: 3.3.0\n",
        );
        let reporter = DiagnosticReporter::new(context(runtime));
        let report = reporter.build(&select(&[SectionKind::GemEnv]));
        let section = &report.sections()[0];
        assert_eq!(section.kind(), SectionKind::GemEnv);
        assert_eq!(
            section.lines(),
            [
                "RubyGems Environment:",
                "  - RUBYGEMS VERSION: 3.5.3",
                "  - RUBY VERSION: 3.3.0",
            ]
        );
        assert!(section.render().contains("Gem Environment"));
    }

    #[test]
    fn gem_environment_load_error_shows_not_found() {
        let runtime = FakeRuntime::new().with_load_error("gem_environment");
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::GemEnv]));
        assert!(text.contains("NOT FOUND!"));
    }

    #[test]
    fn gem_settings_fall_back_to_not_defined() {
        let runtime = FakeRuntime::new().with_value("gem_dir", "/opt/ruby/lib/ruby/gems/3.3.0");
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::GemSettings]));
        assert!(text.contains(&format!("{}/opt/ruby/lib/ruby/gems/3.3.0", ljust("dir", 25))));
        assert!(text.contains(&format!("{}not defined", ljust("spec_cache_dir", 25))));
    }

    #[test]
    fn user_name_is_redacted() {
        let runtime = FakeRuntime::new().with_value("gem_user_home", "/home/devuser");
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::GemSettings]));
        assert!(text.contains("/home/<user>"));
        assert!(!text.contains("devuser"));
    }

    #[test]
    fn redaction_can_be_disabled() {
        let runtime = FakeRuntime::new().with_value("gem_user_home", "/home/devuser");
        let mut ctx = context(runtime);
        ctx.redact_user = false;
        let text = DiagnosticReporter::new(ctx).generate(&select(&[SectionKind::GemSettings]));
        assert!(text.contains("/home/devuser"));
    }

    #[test]
    fn unavailable_runtime_still_renders() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::unavailable()));
        let text = reporter.generate(&select(&[SectionKind::Encodings, SectionKind::CliTools]));
        assert!(text.contains(&format!("{}unknown", ljust("locale", 25))));
        assert!(text.contains("missing binstub"));
    }

    #[test]
    fn gem_list_uses_discovered_dirs() {
        let temp = TempDir::new().unwrap();
        let bundled = temp.path().join("bundled");
        let user = temp.path().join("user");
        fs::create_dir_all(&bundled).unwrap();
        fs::create_dir_all(&user).unwrap();
        for dir in [&bundled, &user] {
            fs::write(dir.join("foo-1.0.0.gemspec"), "").unwrap();
            fs::write(dir.join("foo-2.0.0.gemspec"), "").unwrap();
        }
        fs::write(bundled.join("rake-13.1.0.gemspec"), "").unwrap();

        let runtime = FakeRuntime::new()
            .with_value("bundled_spec_dir", bundled.to_string_lossy())
            .with_value("user_spec_dir", user.to_string_lossy());
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::GemList]));

        assert!(text.contains(&format!("B  {} * 2.0.0 1.0.0", ljust("foo", 25))));
        assert!(text.contains(&format!("U  {} * 2.0.0 1.0.0", ljust("foo", 25))));
        assert!(text.contains(&format!("B  {}   13.1.0", ljust("rake", 25))));
    }

    #[test]
    fn gem_list_with_only_empty_dirs() {
        let temp = TempDir::new().unwrap();
        let runtime = FakeRuntime::new()
            .with_value("installed_spec_dir", temp.path().to_string_lossy());
        let reporter = DiagnosticReporter::new(context(runtime));
        let text = reporter.generate(&select(&[SectionKind::GemList]));
        assert!(text.contains("No installed gems found"));
        assert!(!text.contains("Installed Gems"));
    }

    #[test]
    fn free_text_redaction_follows_context() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::new()));
        assert_eq!(reporter.redact("/home/devuser/.gem"), "/home/<user>/.gem");

        let mut ctx = context(FakeRuntime::new());
        ctx.redact_user = false;
        let reporter = DiagnosticReporter::new(ctx);
        assert_eq!(reporter.redact("/home/devuser/.gem"), "/home/devuser/.gem");
    }

    #[test]
    fn gem_list_without_dirs() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::new()));
        let text = reporter.generate(&select(&[SectionKind::GemList]));
        assert!(text.contains("No installed gems found"));
    }

    #[test]
    fn report_has_banner_and_footer() {
        let reporter = DiagnosticReporter::new(context(FakeRuntime::new()));
        let text = reporter.generate(&select(&[SectionKind::Path]));
        assert!(text.starts_with(&rule(RULE_WIDTH)));
        assert!(text.contains(&format!("rbdiag v{}", env!("CARGO_PKG_VERSION"))));
        assert!(text.trim_end().ends_with(&rule(RULE_WIDTH)));
    }
}
