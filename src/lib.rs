//! dslint - Design System Linter
//!
//! A fast, modular linter enforcing design-system compliance in JS/JSX and
//! CSS sources: brand color tokens, button variants, icon naming, and text
//! casing.
//!
//! # Architecture
//!
//! ```text
//! CLI -> Engine -> Plugin -> Document -> Rules
//! ```
//!
//! The engine loads configuration, routes files to the built-in plugins by
//! extension (script for js/jsx/ts/tsx, style for css), and collects
//! diagnostics. Each rule is a stateless check over one node of the parsed
//! document plus the constant brand tables; fixes are byte-span text
//! replacements applied by the fixer.

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod fixer;
pub mod output;
pub mod plugin;
pub mod rule;
pub mod tokens;
pub mod validate;
pub mod watch;

// Re-export main types
pub use config::{ColorMode, Config, ConfigError, OutputFormat};
pub use diagnostic::{Diagnostic, Fix as DiagnosticFix, FixSafety, Location, Severity, Span};
pub use engine::{Engine, LintResult};
pub use fixer::{Fix, FixMode, FixResult, Fixer};
pub use output::{CompactFormatter, GithubFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use plugin::{ParseError, Plugin};
pub use rule::{RuleKind, RuleMeta};
pub use validate::{ValidationReport, Validator};
pub use watch::Watcher;

// Built-in plugins
pub mod plugins {
    pub mod script;
    pub mod style;
}
