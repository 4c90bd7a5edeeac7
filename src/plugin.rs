//! Plugin system for language-specific parsing and rule evaluation

use crate::diagnostic::Diagnostic;
use crate::rule::RuleMeta;
use std::path::Path;
use thiserror::Error;

/// Error during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid document: {0}")]
    Invalid(String),
}

/// Plugin trait for language-specific linting
///
/// A plugin owns its document model and its rule table. Rules are stateless
/// per-node checks; the plugin runs every enabled rule over every node of the
/// parsed document and returns the collected diagnostics.
pub trait Plugin: Send + Sync {
    /// Plugin identifier (e.g. "script", "style")
    fn id(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// File extensions this plugin handles (without dot, e.g. "jsx", "css")
    fn extensions(&self) -> &[&str];

    /// Metadata for all rules provided by this plugin
    fn rule_metas(&self) -> Vec<&RuleMeta>;

    /// Lint file content, returning diagnostics at their default severities
    fn lint(&self, content: &str, path: &Path) -> Result<Vec<Diagnostic>, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::Syntax {
            line: 10,
            message: "unterminated string literal".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "syntax error at line 10: unterminated string literal"
        );
    }

    #[test]
    fn test_invalid_error_display() {
        let err = ParseError::Invalid("empty document".to_string());
        assert_eq!(format!("{}", err), "invalid document: empty document");
    }
}
