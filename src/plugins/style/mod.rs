//! Style plugin: design-system linting for stylesheets

mod parser;
mod rules;

pub use parser::{Declaration, StyleSheet};
pub use rules::{builtin_rules, StyleRule};

use crate::diagnostic::Diagnostic;
use crate::plugin::{ParseError, Plugin};
use crate::rule::RuleMeta;
use std::path::Path;

/// Plugin linting CSS against the design system
pub struct StylePlugin {
    rules: Vec<Box<dyn StyleRule>>,
}

impl Default for StylePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl StylePlugin {
    pub fn new() -> Self {
        Self {
            rules: rules::builtin_rules(),
        }
    }
}

impl Plugin for StylePlugin {
    fn id(&self) -> &str {
        "style"
    }

    fn description(&self) -> &str {
        "Design-system linter for stylesheets"
    }

    fn extensions(&self) -> &[&str] {
        &["css"]
    }

    fn rule_metas(&self) -> Vec<&RuleMeta> {
        self.rules.iter().map(|r| r.meta()).collect()
    }

    fn lint(&self, content: &str, path: &Path) -> Result<Vec<Diagnostic>, ParseError> {
        let sheet = StyleSheet::parse(content, path)?;
        let mut diagnostics = Vec::new();

        for decl in sheet.declarations() {
            for rule in &self.rules {
                rule.check(decl, &sheet, &mut diagnostics);
            }
        }

        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_id() {
        let plugin = StylePlugin::new();
        assert_eq!(plugin.id(), "style");
    }

    #[test]
    fn test_plugin_extensions() {
        let plugin = StylePlugin::new();
        assert_eq!(plugin.extensions(), &["css"]);
    }

    #[test]
    fn test_plugin_rule_metas() {
        let plugin = StylePlugin::new();
        assert_eq!(plugin.rule_metas().len(), 3);
    }

    #[test]
    fn test_tokenized_declaration_triggers_no_rule() {
        let plugin = StylePlugin::new();
        let diags = plugin
            .lint(".a { color: var(--color-primary); }", Path::new("a.css"))
            .unwrap();
        assert!(diags.is_empty(), "unexpected: {:?}", diags);
    }

    #[test]
    fn test_plugin_lint_collects_across_rules() {
        let plugin = StylePlugin::new();
        let src = concat!(
            ".card {\n",
            "  color: #123456;\n",
            "  font-family: Arial;\n",
            "}\n",
        );
        let diags = plugin.lint(src, Path::new("a.css")).unwrap();
        let ids: Vec<&str> = diags.iter().map(|d| d.rule_id.as_str()).collect();
        assert!(ids.contains(&"css-no-hardcoded-colors"));
        assert!(ids.contains(&"use-design-tokens"));
        assert!(ids.contains(&"font-usage"));
    }
}
