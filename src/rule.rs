//! Rule metadata
//!
//! Every rule ships a static `RuleMeta` describing it: id, what it checks,
//! whether it is a problem or a suggestion, its recommended severity, and
//! whether a deterministic fix can be computed. The rule logic itself lives
//! with the owning plugin; the registries are plain tables built once at
//! plugin creation.

use crate::diagnostic::Severity;
use serde::Serialize;
use std::fmt;

/// ESLint-style rule classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// The flagged code is wrong with respect to the design system
    Problem,
    /// The flagged code is discouraged but not definitively wrong
    Suggestion,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Problem => write!(f, "problem"),
            RuleKind::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// Static metadata for a lint rule
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleMeta {
    /// Unique rule identifier (e.g. "no-hardcoded-colors")
    pub id: &'static str,

    /// What the rule enforces
    pub description: &'static str,

    /// Problem vs suggestion
    pub kind: RuleKind,

    /// Recommended severity
    pub severity: Severity,

    /// Whether the rule can compute a deterministic fix
    pub fixable: bool,

    /// Whether the rule is part of the recommended configuration
    pub recommended: bool,
}

impl RuleMeta {
    /// Check whether this rule's violations fail a build under the
    /// recommended configuration
    pub fn fails_build(&self) -> bool {
        self.recommended && self.severity == Severity::Error
    }
}
