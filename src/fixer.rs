//! Auto-fix system for applying rule fixes to files
//!
//! Every dslint fix is a replacement of a byte span in the source file.
//! Fixes are collected from diagnostics, grouped by file, sorted bottom-up
//! and spliced into the content; overlapping fixes are dropped after the
//! first. Fixes are classified safe or unsafe; unsafe fixes require
//! explicit opt-in.

use crate::diagnostic::{Diagnostic, FixSafety};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A fix to be applied to a file
#[derive(Debug, Clone)]
pub struct Fix {
    /// File path
    pub file: PathBuf,
    /// Line the originating diagnostic pointed at
    pub line: usize,
    /// Start byte offset of the replaced span
    pub start: usize,
    /// End byte offset (exclusive) of the replaced span
    pub end: usize,
    /// The replacement text
    pub replacement: String,
    /// Description of the fix
    pub description: String,
    /// Rule ID that generated this fix
    pub rule_id: String,
    /// Safety classification
    pub safety: FixSafety,
}

/// Result of applying fixes
#[derive(Debug, Default)]
pub struct FixResult {
    /// Number of files modified
    pub files_modified: usize,
    /// Number of fixes applied
    pub fixes_applied: usize,
    /// Number of safe fixes applied
    pub safe_fixes_applied: usize,
    /// Number of unsafe fixes applied
    pub unsafe_fixes_applied: usize,
    /// Number of fixes that failed
    pub fixes_failed: usize,
    /// Number of fixes skipped (unsafe when not allowed, or overlapping)
    pub fixes_skipped: usize,
    /// Errors encountered
    pub errors: Vec<String>,
    /// Diff output (if diff mode enabled)
    pub diffs: HashMap<PathBuf, String>,
}

/// Fix mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Apply only safe fixes (default)
    #[default]
    SafeOnly,
    /// Apply all fixes including unsafe
    All,
    /// Diff mode - show changes without applying
    Diff,
    /// Show fixes without applying
    ShowOnly,
}

/// Auto-fixer that applies fixes to files
pub struct Fixer {
    /// Dry run mode (don't write changes)
    dry_run: bool,
    /// Fixes grouped by file
    fixes_by_file: HashMap<PathBuf, Vec<Fix>>,
    /// Fix mode
    mode: FixMode,
    /// Include unsafe fixes
    include_unsafe: bool,
}

impl Fixer {
    /// Create a new fixer
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            fixes_by_file: HashMap::new(),
            mode: FixMode::SafeOnly,
            include_unsafe: false,
        }
    }

    /// Include unsafe fixes
    pub fn with_unsafe_fixes(mut self, include: bool) -> Self {
        self.include_unsafe = include;
        if include && self.mode == FixMode::SafeOnly {
            self.mode = FixMode::All;
        }
        self
    }

    /// Set diff mode
    pub fn with_diff_mode(mut self) -> Self {
        self.mode = FixMode::Diff;
        self
    }

    /// Set show-only mode
    pub fn with_show_only(mut self) -> Self {
        self.mode = FixMode::ShowOnly;
        self
    }

    /// Get the current fix mode
    pub fn mode(&self) -> FixMode {
        self.mode
    }

    /// Check if running in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Collect fixes from diagnostics
    pub fn collect_from_diagnostics(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            if let Some(fix) = &diag.fix {
                self.add_fix(Fix {
                    file: diag.location.file.clone(),
                    line: diag.location.line,
                    start: fix.start,
                    end: fix.end,
                    replacement: fix.replacement.clone(),
                    description: fix.description.clone(),
                    rule_id: diag.rule_id.clone(),
                    safety: fix.safety,
                });
            }
        }
    }

    /// Add a fix manually
    pub fn add_fix(&mut self, fix: Fix) {
        self.fixes_by_file
            .entry(fix.file.clone())
            .or_default()
            .push(fix);
    }

    /// Get count of fixes collected
    pub fn pending_count(&self) -> usize {
        self.fixes_by_file.values().map(|v| v.len()).sum()
    }

    /// Check if a fix should be applied based on mode and safety
    fn should_apply_fix(&self, fix: &Fix) -> bool {
        match self.mode {
            FixMode::All => true,
            FixMode::SafeOnly => fix.safety == FixSafety::Safe,
            FixMode::Diff | FixMode::ShowOnly => {
                self.include_unsafe || fix.safety == FixSafety::Safe
            }
        }
    }

    /// Apply all collected fixes
    pub fn apply_all(&self) -> FixResult {
        let mut result = FixResult::default();

        for (file, fixes) in &self.fixes_by_file {
            let applicable: Vec<&Fix> = fixes.iter().filter(|f| self.should_apply_fix(f)).collect();
            result.fixes_skipped += fixes.len() - applicable.len();

            if self.mode == FixMode::ShowOnly {
                for fix in &applicable {
                    if fix.safety == FixSafety::Safe {
                        result.safe_fixes_applied += 1;
                    } else {
                        result.unsafe_fixes_applied += 1;
                    }
                    result.fixes_applied += 1;
                }
                continue;
            }

            match self.apply_fixes_to_file(file, &applicable, &mut result) {
                Ok(count) => {
                    if count > 0 {
                        result.files_modified += 1;
                        result.fixes_applied += count;
                    }
                }
                Err(e) => {
                    result.fixes_failed += applicable.len();
                    result.errors.push(format!("{}: {}", file.display(), e));
                }
            }
        }

        result
    }

    /// Apply fixes to a single file
    fn apply_fixes_to_file(
        &self,
        file: &Path,
        fixes: &[&Fix],
        result: &mut FixResult,
    ) -> Result<usize, std::io::Error> {
        if fixes.is_empty() {
            return Ok(0);
        }

        let content = std::fs::read_to_string(file)?;

        // apply from the end of the file backwards so earlier spans stay valid
        let mut sorted: Vec<&Fix> = fixes.to_vec();
        sorted.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

        let mut new_content = content.clone();
        let mut applied = 0;
        let mut last_applied_start = usize::MAX;

        for fix in sorted {
            if fix.end > new_content.len() || fix.start > fix.end {
                log::warn!(
                    "{}: fix span {}..{} out of bounds, skipping",
                    file.display(),
                    fix.start,
                    fix.end
                );
                result.fixes_skipped += 1;
                continue;
            }
            // two diagnostics can target the same span (e.g. two color
            // occurrences whose rewrites both replace the whole literal);
            // the first one wins
            if fix.end > last_applied_start {
                result.fixes_skipped += 1;
                continue;
            }

            new_content.replace_range(fix.start..fix.end, &fix.replacement);
            last_applied_start = fix.start;
            applied += 1;

            if fix.safety == FixSafety::Safe {
                result.safe_fixes_applied += 1;
            } else {
                result.unsafe_fixes_applied += 1;
            }
        }

        if applied > 0 {
            if self.mode == FixMode::Diff {
                let diff = generate_unified_diff(file, &content, &new_content);
                result.diffs.insert(file.to_path_buf(), diff);
            } else if !self.dry_run {
                std::fs::write(file, new_content)?;
            }
        }

        Ok(applied)
    }

    /// Get all fixes that would be applied, ordered by file and line
    pub fn get_pending_fixes(&self) -> Vec<&Fix> {
        let mut all: Vec<&Fix> = self
            .fixes_by_file
            .values()
            .flatten()
            .filter(|f| self.should_apply_fix(f))
            .collect();
        all.sort_by(|a, b| a.file.cmp(&b.file).then(a.start.cmp(&b.start)));
        all
    }

    /// Format fixes for display (--show-fixes)
    pub fn format_fixes(&self) -> String {
        let fixes = self.get_pending_fixes();
        let mut output = String::new();

        if fixes.is_empty() {
            return "No fixes available.\n".to_string();
        }

        output.push_str(&format!("Found {} fix(es):\n\n", fixes.len()));

        let mut current_file: Option<&PathBuf> = None;
        for fix in fixes {
            if current_file != Some(&fix.file) {
                current_file = Some(&fix.file);
                output.push_str(&format!("{}:\n", fix.file.display()));
            }

            let safety_marker = match fix.safety {
                FixSafety::Safe => "[safe]",
                FixSafety::Unsafe => "[unsafe]",
            };

            output.push_str(&format!(
                "  Line {}: {} {} - {}\n",
                fix.line, safety_marker, fix.rule_id, fix.description
            ));
        }

        output
    }

    /// Format diff output for display
    pub fn format_diffs(&self, result: &FixResult) -> String {
        let mut output = String::new();

        for (file, diff) in &result.diffs {
            output.push_str(&format!(
                "diff --dslint a/{} b/{}\n",
                file.display(),
                file.display()
            ));
            output.push_str(diff);
            output.push('\n');
        }

        output
    }
}

/// Generate a unified diff between two strings
fn generate_unified_diff(file: &Path, original: &str, modified: &str) -> String {
    let mut diff = String::new();

    let original_lines: Vec<&str> = original.lines().collect();
    let modified_lines: Vec<&str> = modified.lines().collect();

    diff.push_str(&format!("--- a/{}\n", file.display()));
    diff.push_str(&format!("+++ b/{}\n", file.display()));

    let max_len = original_lines.len().max(modified_lines.len());
    let mut in_hunk = false;
    let mut hunk_start = 0;
    let mut hunk_lines: Vec<String> = Vec::new();

    for i in 0..max_len {
        let orig = original_lines.get(i);
        let modif = modified_lines.get(i);

        match (orig, modif) {
            (Some(o), Some(m)) if o == m => {
                if in_hunk {
                    hunk_lines.push(format!(" {}", o));
                }
            }
            (Some(o), Some(m)) => {
                if !in_hunk {
                    in_hunk = true;
                    hunk_start = i + 1;
                    if i > 0 {
                        if let Some(ctx) = original_lines.get(i - 1) {
                            hunk_lines.push(format!(" {}", ctx));
                        }
                    }
                }
                hunk_lines.push(format!("-{}", o));
                hunk_lines.push(format!("+{}", m));
            }
            (Some(o), None) => {
                if !in_hunk {
                    in_hunk = true;
                    hunk_start = i + 1;
                }
                hunk_lines.push(format!("-{}", o));
            }
            (None, Some(m)) => {
                if !in_hunk {
                    in_hunk = true;
                    hunk_start = i + 1;
                }
                hunk_lines.push(format!("+{}", m));
            }
            (None, None) => {}
        }
    }

    if !hunk_lines.is_empty() {
        diff.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            hunk_start,
            original_lines.len(),
            hunk_start,
            modified_lines.len()
        ));
        for line in hunk_lines {
            diff.push_str(&line);
            diff.push('\n');
        }
    }

    diff
}
