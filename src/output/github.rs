//! GitHub Actions output formatter
//!
//! Outputs diagnostics in GitHub Actions workflow command format:
//! ::warning file={name},line={line},col={col}::{message}

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;

/// Formatter for GitHub Actions annotations
pub struct GithubFormatter {
    /// Whether to include summary
    pub show_summary: bool,
}

impl GithubFormatter {
    /// Create a new GitHub formatter
    pub fn new() -> Self {
        Self { show_summary: true }
    }

    /// Disable summary output
    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }
}

impl Default for GithubFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for GithubFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for diag in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diag));
            output.push('\n');
        }

        if self.show_summary && !result.diagnostics.is_empty() {
            output.push_str(&format!(
                "::notice::Design-system lint complete: {} error(s), {} warning(s) in {} file(s)\n",
                result.error_count, result.warning_count, result.files_processed
            ));
            output.push_str("::group::Lint Summary\n");
            output.push_str(&format!("Files checked: {}\n", result.files_processed));
            output.push_str(&format!("Errors: {}\n", result.error_count));
            output.push_str(&format!("Warnings: {}\n", result.warning_count));
            output.push_str(&format!("Info: {}\n", result.info_count));
            output.push_str("::endgroup::\n");
        }

        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let level = match diagnostic.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "notice",
        };

        // escape special characters in message
        let message = diagnostic
            .message
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");

        format!(
            "::{} file={},line={},col={},title={}::{}",
            level,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column.max(1),
            diagnostic.rule_id,
            message
        )
    }
}
