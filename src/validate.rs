//! Design-system validation runner
//!
//! Runs the full compliance check suite: the design-token file must exist and
//! define the required custom properties, a linter configuration must be
//! present, and the configured sources must lint clean. Checks run
//! sequentially and failures are aggregated; any failure makes the run fail.

use crate::config::Config;
use crate::engine::Engine;
use crate::tokens;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Outcome of a single validation check
#[derive(Debug)]
pub struct Check {
    /// What was checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Failure details (empty on pass)
    pub details: Vec<String>,
}

impl Check {
    fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            details: Vec::new(),
        }
    }

    fn fail(name: &str, details: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            details,
        }
    }
}

/// Aggregated validation outcome
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub checks: Vec<Check>,
}

impl ValidationReport {
    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| !c.passed)
    }

    /// Exit code for the process (0 = all passed, 1 = failures)
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Runs the design-system validation checks against a project directory
pub struct Validator<'a> {
    config: &'a Config,
    base_dir: PathBuf,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a Config, base_dir: &Path) -> Self {
        Self {
            config,
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Run all checks in order
    pub fn run(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let tokens_check = self.check_design_tokens();
        report.checks.push(tokens_check);
        report.checks.push(self.check_config_present());
        report.checks.push(self.check_lint_clean());

        report
    }

    /// The token file must exist and define every required custom property
    fn check_design_tokens(&self) -> Check {
        let name = "Design tokens file";
        let path = self.base_dir.join(&self.config.validate.tokens_file);

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                return Check::fail(
                    name,
                    vec![format!("missing token file: {}", path.display())],
                );
            }
        };

        let missing: Vec<String> = tokens::REQUIRED_TOKENS
            .iter()
            .filter(|token| !content.contains(*token))
            .map(|token| format!("missing design token: {}", token))
            .collect();

        if missing.is_empty() {
            Check::pass(name)
        } else {
            Check::fail(name, missing)
        }
    }

    /// A linter configuration file must be present in the project
    fn check_config_present(&self) -> Check {
        let name = "Linter configuration";

        let found = Config::project_config_names()
            .iter()
            .any(|candidate| self.base_dir.join(candidate).exists());

        if found {
            Check::pass(name)
        } else {
            Check::fail(
                name,
                vec![format!(
                    "no configuration file found (expected one of: {})",
                    Config::project_config_names().join(", ")
                )],
            )
        }
    }

    /// The configured sources must lint clean
    fn check_lint_clean(&self) -> Check {
        let name = "Design-system lint";

        let files = self.collect_files();
        if files.is_empty() {
            return Check::pass(name);
        }

        let engine = Engine::with_builtin_plugins(self.config.clone());
        let result = engine.lint(&files);

        // warn-severity rules do not fail the validation
        if !result.has_errors() {
            Check::pass(name)
        } else {
            let mut details = vec![format!(
                "{} error(s), {} warning(s) in {} file(s)",
                result.error_count, result.warning_count, result.files_processed
            )];
            for diag in result.diagnostics.iter().take(10) {
                details.push(format!(
                    "{}:{}:{}: {}",
                    diag.location.file.display(),
                    diag.location.line,
                    diag.location.column,
                    diag.message
                ));
            }
            if result.diagnostics.len() > 10 {
                details.push(format!("... and {} more", result.diagnostics.len() - 10));
            }
            Check::fail(name, details)
        }
    }

    /// Expand the configured include globs under the base directory
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for pattern in &self.config.files.include {
            let full = self.base_dir.join(pattern);
            let Ok(paths) = glob::glob(&full.to_string_lossy()) else {
                continue;
            };
            for path in paths.flatten() {
                if path.is_file() && !self.config.is_excluded(&path) {
                    files.push(path);
                }
            }
        }
        files.sort();
        files.dedup();
        files
    }
}

/// Print a validation report in the CLI's pass/fail style
pub fn print_report(report: &ValidationReport) {
    println!("{}", "Design System Validation".bold());
    println!();

    for check in &report.checks {
        if check.passed {
            println!("  {} {}", "ok".green().bold(), check.name);
        } else {
            println!("  {} {}", "fail".red().bold(), check.name);
            for detail in &check.details {
                println!("       {}", detail);
            }
        }
    }

    println!();
    if report.has_failures() {
        println!("{}", "Design system validation failed.".red().bold());
        println!();
        println!("Quick reference:");
        println!("  - Colors: use var(--color-primary), var(--color-secondary)");
        println!("  - Buttons: use variant=\"contained\"");
        println!("  - Icons: import with the \"Outlined\" suffix");
        println!("  - Text: use sentence case");
    } else {
        println!("{}", "All design system checks passed.".green().bold());
    }
}
