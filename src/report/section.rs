//! Column-aligned report sections.

use std::collections::BTreeSet;

use super::kind::SectionKind;

/// Character used for rule lines.
pub const DASH: char = '─';

/// Width of a section rule line.
pub const RULE_WIDTH: usize = 75;

/// Label column widths used across the report.
pub const COL_WIDTH: [usize; 6] = [34, 14, 17, 26, 10, 16];

/// Label width for key/value listings such as ENV and gem settings.
pub const LIST_LABEL_WIDTH: usize = 25;

/// Width of the status column in file and directory probes.
pub const STATUS_WIDTH: usize = 23;

/// Left-justify `text` to `width` characters.
pub fn ljust(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// A rule line of `count` dashes.
pub fn rule(count: usize) -> String {
    DASH.to_string().repeat(count)
}

/// A named block of report text with a fixed-width label column.
#[derive(Debug, Clone)]
pub struct ReportSection {
    kind: SectionKind,
    label_width: usize,
    lines: Vec<String>,
    emphasized: BTreeSet<usize>,
}

impl ReportSection {
    /// Create an empty section.
    pub fn new(kind: SectionKind, label_width: usize) -> Self {
        Self {
            kind,
            label_width,
            lines: Vec::new(),
            emphasized: BTreeSet::new(),
        }
    }

    /// Add a line that terminals should highlight.
    pub fn headline(&mut self, line: impl Into<String>) {
        self.emphasized.insert(self.lines.len());
        self.lines.push(line.into());
    }

    /// Whether the body line at `index` is highlighted.
    pub fn is_emphasized(&self, index: usize) -> bool {
        self.emphasized.contains(&index)
    }

    /// The section kind.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// The label column width.
    pub fn label_width(&self) -> usize {
        self.label_width
    }

    /// Add a `label value` row using the section's label width.
    pub fn row(&mut self, label: &str, value: &str) {
        self.row_with_width(label, value, self.label_width);
    }

    /// Add a `label value` row with an explicit label width.
    pub fn row_with_width(&mut self, label: &str, value: &str, width: usize) {
        self.lines.push(format!("{}{}", ljust(label, width), value));
    }

    /// Add a row whose label is indented by `indent` spaces.
    pub fn indented_row(&mut self, indent: usize, label: &str, value: &str, width: usize) {
        let label = format!("{}{}", " ".repeat(indent), label);
        self.row_with_width(&label, value, width);
    }

    /// Add a line as-is.
    pub fn raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Add an empty line (collapsed if the previous line is already empty).
    pub fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    /// Replace every occurrence of `needle` in the body.
    pub fn redact(&mut self, needle: &str, replacement: &str) {
        for line in &mut self.lines {
            if line.contains(needle) {
                *line = line.replace(needle, replacement);
            }
        }
    }

    /// The section's body lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the section has no body.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The heading line: a rule followed by the section title.
    pub fn heading(&self) -> String {
        format!("{} {}", rule(RULE_WIDTH), self.kind.title())
    }

    /// Render heading and body, ending with a single blank line.
    pub fn render(&self) -> String {
        self.render_styled(|s| s.to_string(), |s| s.to_string())
    }

    /// Render with the heading and emphasized lines passed through `heading`
    /// and `emphasis`.
    pub fn render_styled<H, E>(&self, heading: H, emphasis: E) -> String
    where
        H: Fn(&str) -> String,
        E: Fn(&str) -> String,
    {
        let mut out = heading(&self.heading());
        out.push('\n');
        for (i, line) in self.lines.iter().enumerate() {
            let line = line.trim_end();
            if self.is_emphasized(i) {
                out.push_str(&emphasis(line));
            } else {
                out.push_str(line);
            }
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_pads_label() {
        let mut section = ReportSection::new(SectionKind::Encodings, 25);
        section.row("locale", "UTF-8");
        assert_eq!(section.lines()[0], format!("locale{}UTF-8", " ".repeat(19)));
    }

    #[test]
    fn long_label_is_not_truncated() {
        let mut section = ReportSection::new(SectionKind::Ruby, 4);
        section.row("RUBY_PLATFORM", "x86_64-linux");
        assert_eq!(section.lines()[0], "RUBY_PLATFORMx86_64-linux");
    }

    #[test]
    fn indented_row_counts_indent_in_width() {
        let mut section = ReportSection::new(SectionKind::Ssl, 34);
        section.indented_row(4, "SSL Verify", "Success", 34);
        let line = &section.lines()[0];
        assert!(line.starts_with("    SSL Verify"));
        assert_eq!(line.find("Success"), Some(34));
    }

    #[test]
    fn blank_lines_collapse() {
        let mut section = ReportSection::new(SectionKind::Path, 0);
        section.blank();
        section.raw("/usr/bin");
        section.blank();
        section.blank();
        assert_eq!(section.lines().len(), 2);
    }

    #[test]
    fn redact_replaces_all_occurrences() {
        let mut section = ReportSection::new(SectionKind::Env, 25);
        section.row("HOME", "/home/dev");
        section.row("PWD", "/home/dev/src/dev-tools");
        section.redact("dev", "<user>");
        assert!(section.lines()[0].ends_with("/home/<user>"));
        assert!(section.lines()[1].ends_with("/home/<user>/src/<user>-tools"));
    }

    #[test]
    fn headline_is_tracked() {
        let mut section = ReportSection::new(SectionKind::Ruby, 21);
        section.raw("");
        section.headline("ruby 3.3.0 (2023-12-25 revision 5124f9ac75) [x86_64-linux]");
        assert!(!section.is_emphasized(0));
        assert!(section.is_emphasized(1));
    }

    #[test]
    fn render_starts_with_heading_and_ends_with_blank_line() {
        let mut section = ReportSection::new(SectionKind::Path, 0);
        section.raw("/usr/bin");
        let text = section.render();
        assert!(text.starts_with(&rule(RULE_WIDTH)));
        assert!(text.lines().next().unwrap().ends_with(" Path"));
        assert!(text.ends_with("/usr/bin\n\n"));
    }
}
