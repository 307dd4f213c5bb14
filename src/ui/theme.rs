//! Visual theme and styling.

use console::Style;

/// rbdiag's visual theme.
#[derive(Debug, Clone)]
pub struct RbdiagTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for report section headings (yellow).
    pub section: Style,
    /// Style for emphasized report lines such as the Ruby description (yellow).
    pub emphasis: Style,
}

impl Default for RbdiagTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RbdiagTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            section: Style::new().yellow(),
            emphasis: Style::new().yellow(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            section: Style::new(),
            emphasis: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Style a report section heading.
    pub fn format_section(&self, heading: &str) -> String {
        self.section.apply_to(heading).to_string()
    }

    /// Style an emphasized report line.
    pub fn format_emphasis(&self, line: &str) -> String {
        self.emphasis.apply_to(line).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_messages() {
        let theme = RbdiagTheme::plain();
        assert_eq!(theme.format_success("Complete"), "✓ Complete");
        assert_eq!(theme.format_warning("Caution"), "⚠ Caution");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn plain_theme_leaves_report_text_alone() {
        let theme = RbdiagTheme::plain();
        assert_eq!(theme.format_section("───── Ruby Info"), "───── Ruby Info");
        assert_eq!(theme.format_emphasis("ruby 3.3.0"), "ruby 3.3.0");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = RbdiagTheme::default();
        let new = RbdiagTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
