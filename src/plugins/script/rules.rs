//! Design-system rules for JS/JSX sources

use super::parser::{ScriptDocument, ScriptNode, StrLit, TemplateChunk};
use crate::diagnostic::{Diagnostic, Fix, Severity, Span};
use crate::rule::{RuleKind, RuleMeta};
use crate::tokens;
use regex::Regex;

/// A stateless per-node check over the script document
pub trait ScriptRule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn check(&self, node: &ScriptNode, doc: &ScriptDocument, out: &mut Vec<Diagnostic>);
}

/// Build the script rule table
pub fn builtin_rules() -> Vec<Box<dyn ScriptRule>> {
    vec![
        Box::new(NoHardcodedColors::new()),
        Box::new(ButtonVariantCompliance::new()),
        Box::new(IconTypeCompliance::new()),
        Box::new(TextCasingCompliance::new()),
    ]
}

/// Flag hex colors outside the brand allow-list in string literals and
/// template chunks; offer a token rewrite when a mapping exists.
pub struct NoHardcodedColors {
    meta: RuleMeta,
    hex: Regex,
}

impl NoHardcodedColors {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "no-hardcoded-colors",
                description: "Prevent hardcoded hex colors, require design tokens",
                kind: RuleKind::Problem,
                severity: Severity::Error,
                fixable: true,
                recommended: true,
            },
            hex: Regex::new(tokens::HEX_COLOR_PATTERN).unwrap(),
        }
    }

    fn check_literal(&self, lit: &StrLit, doc: &ScriptDocument, out: &mut Vec<Diagnostic>) {
        // match against the raw inner text so spans line up with the source
        let raw = doc.slice(lit.content_span);
        for m in self.hex.find_iter(raw) {
            let color = m.as_str();
            if tokens::is_allowed_color(color) {
                continue;
            }

            let occurrence = Span::new(
                lit.content_span.start + m.start(),
                lit.content_span.start + m.end(),
            );
            let mut diag = Diagnostic::new(
                self.meta.id,
                self.meta.severity,
                &format!(
                    "Hardcoded color \"{}\" found. Use design tokens instead: \
                     var(--color-primary), var(--color-secondary), etc.",
                    color
                ),
                doc.location(occurrence),
            )
            .with_help(self.meta.description);

            if let Some(token) = tokens::token_suggestion(color) {
                // the rewrite replaces the whole literal, quotes included;
                // safe only when the literal is nothing but the color
                let replacement = format!("\"{}\"", token);
                let description = format!("Replace \"{}\" with {}", color, token);
                let fix = if lit.value.trim() == color {
                    Fix::safe(&description, &replacement, lit.span.start, lit.span.end)
                } else {
                    Fix::unsafe_fix(&description, &replacement, lit.span.start, lit.span.end)
                };
                diag = diag.with_fix(fix);
            }

            out.push(diag);
        }
    }

    fn check_template(&self, chunk: &TemplateChunk, doc: &ScriptDocument, out: &mut Vec<Diagnostic>) {
        for m in self.hex.find_iter(&chunk.raw) {
            let color = m.as_str();
            if tokens::is_allowed_color(color) {
                continue;
            }

            let occurrence =
                Span::new(chunk.span.start + m.start(), chunk.span.start + m.end());
            out.push(
                Diagnostic::new(
                    self.meta.id,
                    self.meta.severity,
                    &format!(
                        "Hardcoded color \"{}\" found in template literal. \
                         Use design tokens instead.",
                        color
                    ),
                    doc.location(occurrence),
                )
                .with_help(self.meta.description),
            );
        }
    }
}

impl ScriptRule for NoHardcodedColors {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, node: &ScriptNode, doc: &ScriptDocument, out: &mut Vec<Diagnostic>) {
        match node {
            ScriptNode::StrLit(lit) => self.check_literal(lit, doc, out),
            ScriptNode::TemplateChunk(chunk) => self.check_template(chunk, doc, out),
            _ => {}
        }
    }
}

/// Enforce filled button variants only
pub struct ButtonVariantCompliance {
    meta: RuleMeta,
}

impl ButtonVariantCompliance {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "button-variant-compliance",
                description: "Enforce filled button variants only",
                kind: RuleKind::Problem,
                severity: Severity::Error,
                fixable: true,
                recommended: true,
            },
        }
    }
}

impl ScriptRule for ButtonVariantCompliance {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, node: &ScriptNode, doc: &ScriptDocument, out: &mut Vec<Diagnostic>) {
        let ScriptNode::JsxElement(el) = node else {
            return;
        };
        if !tokens::BUTTON_COMPONENTS.contains(&el.name.as_str()) {
            return;
        }
        let Some(attr) = el.attr("variant") else {
            return;
        };
        // dynamic variant expressions are not inspected
        let Some((variant, span)) = attr.literal_value() else {
            return;
        };

        if tokens::DISALLOWED_BUTTON_VARIANTS.contains(&variant) {
            let replacement = format!("\"{}\"", tokens::ALLOWED_BUTTON_VARIANT);
            out.push(
                Diagnostic::new(
                    self.meta.id,
                    self.meta.severity,
                    &format!(
                        "Button variant \"{}\" not allowed. Use \"{}\" for filled buttons.",
                        variant,
                        tokens::ALLOWED_BUTTON_VARIANT
                    ),
                    doc.location(span),
                )
                .with_help(self.meta.description)
                .with_fix(Fix::safe(
                    &format!("Change variant to \"{}\"", tokens::ALLOWED_BUTTON_VARIANT),
                    &replacement,
                    span.start,
                    span.end,
                )),
            );
        }
    }
}

/// Enforce Outlined icon imports only
pub struct IconTypeCompliance {
    meta: RuleMeta,
}

impl IconTypeCompliance {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "icon-type-compliance",
                description: "Enforce Material Icons Outlined only",
                kind: RuleKind::Problem,
                severity: Severity::Error,
                fixable: true,
                recommended: true,
            },
        }
    }
}

impl ScriptRule for IconTypeCompliance {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, node: &ScriptNode, doc: &ScriptDocument, out: &mut Vec<Diagnostic>) {
        let ScriptNode::ImportDecl(decl) = node else {
            return;
        };
        if decl.source != tokens::ICON_PACKAGE {
            return;
        }

        for spec in &decl.specifiers {
            if spec.imported.ends_with(tokens::ICON_REQUIRED_SUFFIX) {
                continue;
            }

            let suggested = tokens::outlined_icon_name(&spec.imported);
            // the fix renames the import specifier only; usages of the old
            // binding elsewhere in the file keep the old name
            out.push(
                Diagnostic::new(
                    self.meta.id,
                    self.meta.severity,
                    &format!(
                        "Icon \"{}\" should use Outlined variant. Import \"{}\" instead.",
                        spec.imported, suggested
                    ),
                    doc.location(spec.span),
                )
                .with_help(self.meta.description)
                .with_fix(Fix::unsafe_fix(
                    &format!("Rename import to \"{}\"", suggested),
                    &suggested,
                    spec.span.start,
                    spec.span.end,
                ))
                .with_note("Other usages of the old binding are not renamed"),
            );
        }
    }
}

/// Enforce sentence-case text (no Title Case or UPPERCASE)
pub struct TextCasingCompliance {
    meta: RuleMeta,
    title_case: Regex,
}

impl TextCasingCompliance {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "text-casing-compliance",
                description: "Enforce sentence case text (no Title Case or UPPERCASE)",
                kind: RuleKind::Suggestion,
                severity: Severity::Warning,
                fixable: true,
                recommended: true,
            },
            title_case: Regex::new(r"^[A-Z][a-z]+(\s[A-Z][a-z]+)*$").unwrap(),
        }
    }

    fn is_all_caps(text: &str) -> bool {
        text == text.to_uppercase() && text != text.to_lowercase()
    }

    fn to_sentence_case(text: &str) -> String {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        }
    }
}

impl ScriptRule for TextCasingCompliance {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, node: &ScriptNode, doc: &ScriptDocument, out: &mut Vec<Diagnostic>) {
        let ScriptNode::StrLit(lit) = node else {
            return;
        };
        if lit.value.chars().count() <= 1 {
            return;
        }

        let text = lit.value.trim();
        if !self.title_case.is_match(text) && !Self::is_all_caps(text) {
            return;
        }

        let suggestion = Self::to_sentence_case(text);
        let replacement = format!("\"{}\"", suggestion);
        out.push(
            Diagnostic::new(
                self.meta.id,
                self.meta.severity,
                &format!(
                    "Text \"{}\" should use sentence case. Consider: \"{}\"",
                    text, suggestion
                ),
                doc.location(lit.span),
            )
            .with_help(self.meta.description)
            .with_fix(Fix::safe(
                &format!("Rewrite as \"{}\"", suggestion),
                &replacement,
                lit.span.start,
                lit.span.end,
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn lint_with(rule: &dyn ScriptRule, src: &str) -> Vec<Diagnostic> {
        let doc = ScriptDocument::parse(src, Path::new("test.jsx")).unwrap();
        let mut out = Vec::new();
        for node in doc.nodes() {
            rule.check(node, &doc, &mut out);
        }
        out
    }

    #[test]
    fn test_color_rule_flags_unknown_hex() {
        let rule = NoHardcodedColors::new();
        let diags = lint_with(&rule, "const c = '#FF0000';");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "no-hardcoded-colors");
        assert!(diags[0].fix.is_none());
    }

    #[test]
    fn test_color_rule_allows_brand_colors_any_case() {
        let rule = NoHardcodedColors::new();
        assert!(lint_with(&rule, "const c = '#3B4960';").is_empty());
        assert!(lint_with(&rule, "const c = '#3b4960';").is_empty());
        assert!(lint_with(&rule, "const c = '#F1F2F3';").is_empty());
        assert!(lint_with(&rule, "const c = '#f1f2f3';").is_empty());
    }

    #[test]
    fn test_color_rule_suggests_token() {
        let rule = NoHardcodedColors::new();
        let diags = lint_with(&rule, "const ok = '#28a745';");
        assert_eq!(diags.len(), 1);
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "\"var(--color-success)\"");
        assert!(fix.is_safe());
    }

    #[test]
    fn test_color_rule_embedded_color_unsafe_fix() {
        let rule = NoHardcodedColors::new();
        let diags = lint_with(&rule, "const b = '1px solid #dc3545';");
        assert_eq!(diags.len(), 1);
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "\"var(--color-error)\"");
        assert!(!fix.is_safe());
    }

    #[test]
    fn test_color_rule_multiple_occurrences() {
        let rule = NoHardcodedColors::new();
        let diags = lint_with(&rule, "const g = 'from #111111 to #222222';");
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_color_rule_short_hex() {
        let rule = NoHardcodedColors::new();
        let diags = lint_with(&rule, "const c = '#abc';");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_color_rule_template_reported_without_fix() {
        let rule = NoHardcodedColors::new();
        let diags = lint_with(&rule, "const s = `background: #FF0000`;");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].fix.is_none());
        assert!(diags[0].message.contains("template literal"));
    }

    #[test]
    fn test_button_rule_flags_outlined_and_text() {
        let rule = ButtonVariantCompliance::new();
        for variant in ["outlined", "text"] {
            let src = format!("<Button variant=\"{}\">Go</Button>", variant);
            let diags = lint_with(&rule, &src);
            assert_eq!(diags.len(), 1, "variant {}", variant);
            let fix = diags[0].fix.as_ref().unwrap();
            assert_eq!(fix.replacement, "\"contained\"");
        }
    }

    #[test]
    fn test_button_rule_allows_contained() {
        let rule = ButtonVariantCompliance::new();
        assert!(lint_with(&rule, "<Button variant=\"contained\">Go</Button>").is_empty());
    }

    #[test]
    fn test_button_rule_checks_mui_button() {
        let rule = ButtonVariantCompliance::new();
        let diags = lint_with(&rule, "<MuiButton variant=\"text\"/>");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_button_rule_skips_dynamic_variant() {
        let rule = ButtonVariantCompliance::new();
        assert!(lint_with(&rule, "<Button variant={variant}/>").is_empty());
    }

    #[test]
    fn test_button_rule_ignores_other_components() {
        let rule = ButtonVariantCompliance::new();
        assert!(lint_with(&rule, "<Chip variant=\"outlined\"/>").is_empty());
    }

    #[test]
    fn test_icon_rule_flags_non_outlined() {
        let rule = IconTypeCompliance::new();
        let diags = lint_with(&rule, "import { TrendingUp } from '@mui/icons-material';");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("TrendingUpOutlined"));
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "TrendingUpOutlined");
        assert!(!fix.is_safe());
    }

    #[test]
    fn test_icon_rule_allows_outlined() {
        let rule = IconTypeCompliance::new();
        assert!(
            lint_with(&rule, "import { TrendingUpOutlined } from '@mui/icons-material';")
                .is_empty()
        );
    }

    #[test]
    fn test_icon_rule_strips_suffix_variants() {
        let rule = IconTypeCompliance::new();
        let diags = lint_with(&rule, "import { DeleteFilled } from '@mui/icons-material';");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("DeleteOutlined"));
    }

    #[test]
    fn test_icon_rule_ignores_other_packages() {
        let rule = IconTypeCompliance::new();
        assert!(lint_with(&rule, "import { TrendingUp } from 'lucide-react';").is_empty());
    }

    #[test]
    fn test_icon_rule_fix_span_is_import_only() {
        let rule = IconTypeCompliance::new();
        let src = "import { TrendingUp } from '@mui/icons-material';\nrender(TrendingUp);";
        let diags = lint_with(&rule, src);
        assert_eq!(diags.len(), 1);
        let fix = diags[0].fix.as_ref().unwrap();
        // span covers the specifier in the import statement, not the usage
        assert_eq!(&src[fix.start..fix.end], "TrendingUp");
        assert!(fix.end < src.find("render").unwrap());
    }

    #[test]
    fn test_casing_rule_title_case() {
        let rule = TextCasingCompliance::new();
        let diags = lint_with(&rule, "const t = 'Hello World';");
        assert_eq!(diags.len(), 1);
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "\"Hello world\"");
    }

    #[test]
    fn test_casing_rule_all_caps() {
        let rule = TextCasingCompliance::new();
        let diags = lint_with(&rule, "const t = 'HELLO';");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].fix.as_ref().unwrap().replacement, "\"Hello\"");
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn test_casing_rule_sentence_case_ok() {
        let rule = TextCasingCompliance::new();
        assert!(lint_with(&rule, "const t = 'hello world';").is_empty());
        assert!(lint_with(&rule, "const t = 'Athlete development hub';").is_empty());
    }

    #[test]
    fn test_casing_rule_skips_single_char() {
        let rule = TextCasingCompliance::new();
        assert!(lint_with(&rule, "const t = 'A';").is_empty());
    }

    #[test]
    fn test_casing_rule_numbers_not_all_caps() {
        let rule = TextCasingCompliance::new();
        // no cased letters at all - not a violation
        assert!(lint_with(&rule, "const t = '1234';").is_empty());
    }

    #[test]
    fn test_builtin_rules_table() {
        let rules = builtin_rules();
        assert_eq!(rules.len(), 4);
        let ids: Vec<&str> = rules.iter().map(|r| r.meta().id).collect();
        assert!(ids.contains(&"no-hardcoded-colors"));
        assert!(ids.contains(&"button-variant-compliance"));
        assert!(ids.contains(&"icon-type-compliance"));
        assert!(ids.contains(&"text-casing-compliance"));
    }
}
