//! Script plugin: design-system linting for JS/JSX sources

mod parser;
mod rules;

pub use parser::{
    AttrValue, ImportDecl, ImportSpecifier, JsxAttr, JsxElement, ScriptDocument, ScriptNode,
    StrLit, TemplateChunk,
};
pub use rules::{builtin_rules, ScriptRule};

use crate::diagnostic::Diagnostic;
use crate::plugin::{ParseError, Plugin};
use crate::rule::RuleMeta;
use std::path::Path;

/// Plugin linting JS/JSX sources against the design system
pub struct ScriptPlugin {
    rules: Vec<Box<dyn ScriptRule>>,
}

impl Default for ScriptPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptPlugin {
    pub fn new() -> Self {
        Self {
            rules: rules::builtin_rules(),
        }
    }
}

impl Plugin for ScriptPlugin {
    fn id(&self) -> &str {
        "script"
    }

    fn description(&self) -> &str {
        "Design-system linter for JS/JSX sources"
    }

    fn extensions(&self) -> &[&str] {
        &["js", "jsx", "ts", "tsx"]
    }

    fn rule_metas(&self) -> Vec<&RuleMeta> {
        self.rules.iter().map(|r| r.meta()).collect()
    }

    fn lint(&self, content: &str, path: &Path) -> Result<Vec<Diagnostic>, ParseError> {
        let doc = ScriptDocument::parse(content, path)?;
        let mut diagnostics = Vec::new();

        for node in doc.nodes() {
            for rule in &self.rules {
                rule.check(node, &doc, &mut diagnostics);
            }
        }

        Ok(diagnostics)
    }
}
