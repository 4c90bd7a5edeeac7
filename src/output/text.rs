//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show source context
    pub show_source: bool,

    /// Show help text
    pub show_help: bool,

    /// Show fix suggestions
    pub show_fixes: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_source: true,
            show_help: true,
            show_fixes: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn paint(&self, s: &str, color: Color) -> String {
        if self.colored {
            s.color(color).to_string()
        } else {
            s.to_string()
        }
    }

    fn severity_str(&self, severity: Severity) -> String {
        let s = format!("{}", severity);
        if !self.colored {
            return s;
        }
        match severity {
            Severity::Error => s.red().bold().to_string(),
            Severity::Warning => s.yellow().bold().to_string(),
            Severity::Info => s.blue().to_string(),
        }
    }

    fn gutter(&self) -> String {
        self.paint("|", Color::Blue)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        // group diagnostics by file
        let mut by_file: std::collections::BTreeMap<_, Vec<_>> = std::collections::BTreeMap::new();
        for diag in &result.diagnostics {
            by_file
                .entry(diag.location.file.clone())
                .or_default()
                .push(diag);
        }

        for (file, diagnostics) in &by_file {
            let header = file.display().to_string();
            if self.colored {
                output.push_str(&format!("{}\n", header.underline()));
            } else {
                output.push_str(&format!("{}\n", header));
            }

            for diag in diagnostics {
                output.push_str(&self.format_diagnostic(diag));
                output.push('\n');
            }
            output.push('\n');
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} {} processed",
                result.files_processed,
                if result.files_processed == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if result.error_count > 0 {
                let s = format!(
                    "{} {}",
                    result.error_count,
                    if result.error_count == 1 {
                        "error"
                    } else {
                        "errors"
                    }
                );
                counts.push(self.paint(&s, Color::Red));
            }
            if result.warning_count > 0 {
                let s = format!(
                    "{} {}",
                    result.warning_count,
                    if result.warning_count == 1 {
                        "warning"
                    } else {
                        "warnings"
                    }
                );
                counts.push(self.paint(&s, Color::Yellow));
            }
            if result.info_count > 0 {
                let s = format!(
                    "{} {}",
                    result.info_count,
                    if result.info_count == 1 { "info" } else { "infos" }
                );
                counts.push(self.paint(&s, Color::Blue));
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let mut output = String::new();

        let rule = if self.colored {
            diag.rule_id.cyan().to_string()
        } else {
            diag.rule_id.clone()
        };
        output.push_str(&format!(
            "{}:{}:{}: {}[{}]: {}\n",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column,
            self.severity_str(diag.severity),
            rule,
            diag.message
        ));

        if self.show_source {
            output.push_str(&format!("   {}\n", self.gutter()));

            for (line_num, line) in &diag.context_before {
                output.push_str(&format!("{:>4} {} {}\n", line_num, self.gutter(), line));
            }

            if let Some(source) = &diag.source_line {
                output.push_str(&format!(
                    "{:>4} {} {}\n",
                    diag.location.line,
                    self.gutter(),
                    source
                ));

                if diag.location.column > 0 {
                    let padding = " ".repeat(diag.location.column - 1);
                    let underline = "^".repeat(diag.location.length.max(1));
                    output.push_str(&format!(
                        "   {} {}{}\n",
                        self.gutter(),
                        padding,
                        self.paint(&underline, Color::Red)
                    ));
                }
            }

            for (line_num, line) in &diag.context_after {
                output.push_str(&format!("{:>4} {} {}\n", line_num, self.gutter(), line));
            }
        }

        if self.show_help {
            if let Some(help) = &diag.help {
                output.push_str(&format!("   {} help: {}\n", self.paint("=", Color::Blue), help));
            }
        }

        if self.show_fixes {
            if let Some(fix) = &diag.fix {
                output.push_str(&format!(
                    "   {} fix: {} -> {}\n",
                    self.paint("=", Color::Green),
                    fix.description,
                    self.paint(&fix.replacement, Color::Green)
                ));
            }
        }

        for note in &diag.notes {
            output.push_str(&format!("   {} note: {}\n", self.paint("=", Color::Blue), note));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Fix, Location};
    use std::path::PathBuf;

    #[test]
    fn test_format_diagnostic() {
        let formatter = TextFormatter::new().without_color();
        let diag = Diagnostic::new(
            "css-no-hardcoded-colors",
            Severity::Error,
            "Unexpected hardcoded color \"#123456\".",
            Location::new(PathBuf::from("app.css"), 10, 5).with_length(7),
        )
        .with_source_line("    color: #123456;")
        .with_help("Prevent hardcoded colors in stylesheets");

        let output = formatter.format_diagnostic(&diag);
        assert!(output.contains("app.css:10:5"));
        assert!(output.contains("error"));
        assert!(output.contains("css-no-hardcoded-colors"));
        assert!(output.contains("#123456"));
        assert!(output.contains("help:"));
        assert!(output.contains("^^^^^^^"));
    }

    #[test]
    fn test_format_fix_line() {
        let formatter = TextFormatter::new().without_color();
        let diag = Diagnostic::new(
            "no-hardcoded-colors",
            Severity::Error,
            "msg",
            Location::new(PathBuf::from("a.jsx"), 1, 1),
        )
        .with_fix(Fix::safe("Replace with token", "\"var(--color-primary)\"", 0, 9));

        let output = formatter.format_diagnostic(&diag);
        assert!(output.contains("fix: Replace with token -> \"var(--color-primary)\""));
    }

    #[test]
    fn test_format_result_stats() {
        let formatter = TextFormatter::new().without_color();
        let result = LintResult {
            diagnostics: vec![Diagnostic::new(
                "text-casing-compliance",
                Severity::Warning,
                "Test",
                Location::new(PathBuf::from("a.jsx"), 1, 1),
            )],
            files_processed: 1,
            warning_count: 1,
            ..Default::default()
        };

        let output = formatter.format(&result);
        assert!(output.contains("1 file processed"));
        assert!(output.contains("1 warning"));
    }
}
