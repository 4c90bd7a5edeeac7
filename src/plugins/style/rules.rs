//! Design-system rules for stylesheets

use super::parser::{Declaration, StyleSheet};
use crate::diagnostic::{Diagnostic, Fix, Severity, Span};
use crate::rule::{RuleKind, RuleMeta};
use crate::tokens;
use regex::Regex;

/// A stateless per-declaration check over the stylesheet
pub trait StyleRule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn check(&self, decl: &Declaration, sheet: &StyleSheet, out: &mut Vec<Diagnostic>);
}

/// Build the style rule table
pub fn builtin_rules() -> Vec<Box<dyn StyleRule>> {
    vec![
        Box::new(CssNoHardcodedColors::new()),
        Box::new(UseDesignTokens::new()),
        Box::new(FontUsage::new()),
    ]
}

/// Flag hardcoded hex and rgb()/rgba() colors in declaration values
pub struct CssNoHardcodedColors {
    meta: RuleMeta,
    hex: Regex,
    rgb: Regex,
}

impl CssNoHardcodedColors {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "css-no-hardcoded-colors",
                description: "Prevent hardcoded colors in stylesheets, require design tokens",
                kind: RuleKind::Problem,
                severity: Severity::Error,
                fixable: true,
                recommended: true,
            },
            hex: Regex::new(tokens::HEX_COLOR_PATTERN).unwrap(),
            rgb: Regex::new(tokens::RGB_COLOR_PATTERN).unwrap(),
        }
    }
}

impl StyleRule for CssNoHardcodedColors {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, decl: &Declaration, sheet: &StyleSheet, out: &mut Vec<Diagnostic>) {
        // already tokenized
        if decl.value.contains(tokens::VAR_REFERENCE) {
            return;
        }

        for m in self.hex.find_iter(&decl.value) {
            let color = m.as_str();
            let occurrence = Span::new(
                decl.value_span.start + m.start(),
                decl.value_span.start + m.end(),
            );

            if let Some(token) = tokens::brand_color_token(color) {
                out.push(
                    Diagnostic::new(
                        self.meta.id,
                        self.meta.severity,
                        &format!(
                            "Expected \"{}\" instead of \"{}\". Use design tokens.",
                            token, color
                        ),
                        sheet.location(occurrence),
                    )
                    .with_help(self.meta.description)
                    .with_fix(Fix::safe(
                        &format!("Replace \"{}\" with {}", color, token),
                        token,
                        occurrence.start,
                        occurrence.end,
                    )),
                );
            } else {
                out.push(
                    Diagnostic::new(
                        self.meta.id,
                        self.meta.severity,
                        &format!(
                            "Unexpected hardcoded color \"{}\". \
                             Use var(--color-*) design tokens instead.",
                            color
                        ),
                        sheet.location(occurrence),
                    )
                    .with_help(self.meta.description),
                );
            }
        }

        // no mapping table exists for rgb()/rgba(), so these are always
        // rejected without a fix
        for m in self.rgb.find_iter(&decl.value) {
            let occurrence = Span::new(
                decl.value_span.start + m.start(),
                decl.value_span.start + m.end(),
            );
            out.push(
                Diagnostic::new(
                    self.meta.id,
                    self.meta.severity,
                    &format!(
                        "Unexpected hardcoded color \"{}\". \
                         Use var(--color-*) design tokens instead.",
                        m.as_str()
                    ),
                    sheet.location(occurrence),
                )
                .with_help(self.meta.description),
            );
        }
    }
}

/// Require token references (or a few keywords) on visual properties
pub struct UseDesignTokens {
    meta: RuleMeta,
}

impl UseDesignTokens {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "use-design-tokens",
                description: "Require design tokens on color and shadow properties",
                kind: RuleKind::Problem,
                severity: Severity::Error,
                fixable: false,
                recommended: true,
            },
        }
    }
}

impl StyleRule for UseDesignTokens {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, decl: &Declaration, sheet: &StyleSheet, out: &mut Vec<Diagnostic>) {
        if !tokens::TOKEN_ONLY_PROPERTIES
            .iter()
            .any(|p| decl.is_prop(p))
        {
            return;
        }

        let has_var = decl.value.contains(tokens::VAR_REFERENCE);
        let is_allowed = tokens::ALLOWED_KEYWORD_VALUES
            .iter()
            .any(|kw| decl.value.contains(kw));

        if !has_var && !is_allowed {
            out.push(
                Diagnostic::new(
                    self.meta.id,
                    self.meta.severity,
                    &format!(
                        "Property \"{}\" should use design tokens. \
                         Use var(--color-*) instead of \"{}\".",
                        decl.prop, decl.value
                    ),
                    sheet.location(decl.prop_span),
                )
                .with_help(self.meta.description),
            );
        }
    }
}

/// Constrain font-family declarations to tokens or the approved font
pub struct FontUsage {
    meta: RuleMeta,
}

impl FontUsage {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta {
                id: "font-usage",
                description: "Require font-family tokens or the approved font",
                kind: RuleKind::Problem,
                severity: Severity::Error,
                fixable: false,
                recommended: true,
            },
        }
    }
}

impl StyleRule for FontUsage {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, decl: &Declaration, sheet: &StyleSheet, out: &mut Vec<Diagnostic>) {
        if !decl.is_prop("font-family") {
            return;
        }

        let has_token = decl.value.contains(tokens::FONT_TOKEN_PREFIX);
        let has_approved = decl.value.contains(tokens::APPROVED_FONT);

        if !has_token && !has_approved {
            out.push(
                Diagnostic::new(
                    self.meta.id,
                    self.meta.severity,
                    &format!(
                        "Font family should use design tokens or \"{}\". Found: \"{}\".",
                        tokens::APPROVED_FONT,
                        decl.value
                    ),
                    sheet.location(decl.prop_span),
                )
                .with_help(self.meta.description),
            );
        }
    }
}
