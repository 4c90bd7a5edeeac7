//! Core linter engine

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::plugin::Plugin;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a linting operation
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,

    /// Files processed
    pub files_processed: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Files with warnings
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }

    /// Recount severities after external filtering of the diagnostics
    pub fn recount(&mut self) {
        self.error_count = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        self.warning_count = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        self.info_count = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .count();
    }
}

/// The main linter engine
///
/// Routes files to plugins by extension, runs them (in parallel when
/// configured), applies configuration (disabled rules, per-file ignores,
/// severity overrides) and decorates diagnostics with source context.
pub struct Engine {
    /// Configuration
    config: Config,

    /// Registered plugins (keyed by extension)
    plugins: HashMap<String, Arc<dyn Plugin>>,

    /// Number of context lines to include
    context_lines: usize,
}

impl Engine {
    /// Create a new engine with configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            plugins: HashMap::new(),
            context_lines: 0,
        }
    }

    /// Create an engine with both built-in plugins registered
    pub fn with_builtin_plugins(config: Config) -> Self {
        let mut engine = Self::new(config);
        engine.register_plugin(Arc::new(crate::plugins::script::ScriptPlugin::new()));
        engine.register_plugin(Arc::new(crate::plugins::style::StylePlugin::new()));
        engine
    }

    /// Set the number of context lines to include
    pub fn set_context_lines(&mut self, lines: usize) {
        self.context_lines = lines;
    }

    /// Register a plugin
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) {
        for ext in plugin.extensions() {
            self.plugins.insert(ext.to_string(), Arc::clone(&plugin));
        }
    }

    /// All registered plugins, deduplicated
    pub fn plugins(&self) -> Vec<Arc<dyn Plugin>> {
        let mut seen = Vec::new();
        let mut out: Vec<Arc<dyn Plugin>> = Vec::new();
        for plugin in self.plugins.values() {
            if !seen.contains(&plugin.id().to_string()) {
                seen.push(plugin.id().to_string());
                out.push(Arc::clone(plugin));
            }
        }
        out.sort_by(|a, b| a.id().cmp(b.id()));
        out
    }

    /// The extensions the registered plugins handle
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self.plugins.keys().cloned().collect();
        exts.sort();
        exts
    }

    /// Get plugin for a file
    fn get_plugin(&self, path: &Path) -> Option<Arc<dyn Plugin>> {
        let ext = path.extension()?.to_str()?;
        self.plugins.get(ext).cloned()
    }

    /// Lint multiple files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = if self.config.engine.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(if self.config.engine.jobs > 0 {
                    self.config.engine.jobs
                } else {
                    num_cpus::get()
                })
                .build()
                .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().unwrap());

            pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect())
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        let plugin = match self.get_plugin(path) {
            Some(p) => p,
            None => {
                log::debug!("no plugin for {}", path.display());
                return result;
            }
        };

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                result.diagnostics.push(Diagnostic::new(
                    "file-read-error",
                    Severity::Error,
                    &format!("Failed to read file: {}", e),
                    Location::new(path.to_path_buf(), 0, 0),
                ));
                result.error_count = 1;
                result.files_with_errors = 1;
                return result;
            }
        };

        let diagnostics = match plugin.lint(&content, path) {
            Ok(d) => d,
            Err(e) => {
                result.diagnostics.push(Diagnostic::new(
                    "parse-error",
                    Severity::Error,
                    &format!("Parse error: {}", e),
                    Location::new(path.to_path_buf(), 0, 0),
                ));
                result.error_count = 1;
                result.files_with_errors = 1;
                return result;
            }
        };

        let source_lines: Vec<&str> = content.lines().collect();

        for mut diag in diagnostics {
            if !self.config.is_rule_enabled(&diag.rule_id) {
                continue;
            }
            if self.config.should_ignore_rule_for_file(&diag.rule_id, path) {
                continue;
            }

            if let Some(severity) = self.config.get_severity_override(&diag.rule_id) {
                diag.severity = severity;
            }

            let line_num = diag.location.line;
            if line_num > 0 && line_num <= source_lines.len() {
                diag = diag.with_source_line(source_lines[line_num - 1]);
                if self.context_lines > 0 {
                    diag = diag.with_context(&source_lines, self.context_lines);
                }
            }

            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::Info => result.info_count += 1,
            }
            result.diagnostics.push(diag);
        }

        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_lint_result_exit_code() {
        let mut result = LintResult::default();
        assert_eq!(result.exit_code(), 0);

        result.warning_count = 1;
        assert_eq!(result.exit_code(), 1);

        result.error_count = 1;
        assert_eq!(result.exit_code(), 2);
    }

    #[test]
    fn test_lint_result_is_clean() {
        let mut result = LintResult::default();
        assert!(result.is_clean());

        result.warning_count = 1;
        assert!(!result.is_clean());
    }

    #[test]
    fn test_lint_result_merge() {
        let mut result1 = LintResult {
            files_processed: 1,
            error_count: 2,
            ..LintResult::default()
        };

        let result2 = LintResult {
            files_processed: 1,
            warning_count: 3,
            ..LintResult::default()
        };

        result1.merge(result2);
        assert_eq!(result1.files_processed, 2);
        assert_eq!(result1.error_count, 2);
        assert_eq!(result1.warning_count, 3);
    }

    #[test]
    fn test_engine_routes_by_extension() {
        let dir = TempDir::new().unwrap();
        let jsx = write_file(&dir, "App.jsx", "const c = '#FF0000';\n");
        let css = write_file(&dir, "app.css", ".a { color: #123456; }\n");
        let txt = write_file(&dir, "notes.txt", "#FF0000\n");

        let engine = Engine::with_builtin_plugins(Config::default());
        let result = engine.lint(&[jsx, css, txt]);

        assert_eq!(result.files_processed, 3);
        assert!(result.error_count >= 2);
        let rule_ids: Vec<&str> = result
            .diagnostics
            .iter()
            .map(|d| d.rule_id.as_str())
            .collect();
        assert!(rule_ids.contains(&"no-hardcoded-colors"));
        assert!(rule_ids.contains(&"css-no-hardcoded-colors"));
    }

    #[test]
    fn test_engine_disabled_rule_filtered() {
        let dir = TempDir::new().unwrap();
        let jsx = write_file(&dir, "App.jsx", "const t = 'Hello World';\n");

        let mut config = Config::default();
        config
            .rules
            .disabled
            .push("text-casing-compliance".to_string());
        let engine = Engine::with_builtin_plugins(config);
        let result = engine.lint_file(&jsx);

        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_engine_severity_override() {
        let dir = TempDir::new().unwrap();
        let jsx = write_file(&dir, "App.jsx", "const t = 'Hello World';\n");

        let mut config = Config::default();
        config
            .rules
            .severity
            .insert("text-casing-compliance".to_string(), Severity::Error);
        let engine = Engine::with_builtin_plugins(config);
        let result = engine.lint_file(&jsx);

        assert_eq!(result.error_count, 1);
        assert_eq!(result.warning_count, 0);
    }

    #[test]
    fn test_engine_attaches_source_line() {
        let dir = TempDir::new().unwrap();
        let css = write_file(&dir, "app.css", ".a {\n  color: #123456;\n}\n");

        let engine = Engine::with_builtin_plugins(Config::default());
        let result = engine.lint_file(&css);

        let diag = result
            .diagnostics
            .iter()
            .find(|d| d.rule_id == "css-no-hardcoded-colors")
            .unwrap();
        assert_eq!(diag.source_line.as_deref(), Some("  color: #123456;"));
    }

    #[test]
    fn test_engine_missing_file_is_error() {
        let engine = Engine::with_builtin_plugins(Config::default());
        let result = engine.lint_file(Path::new("does/not/exist.jsx"));

        assert_eq!(result.error_count, 1);
        assert_eq!(result.diagnostics[0].rule_id, "file-read-error");
    }

    #[test]
    fn test_engine_sequential_mode() {
        let dir = TempDir::new().unwrap();
        let jsx = write_file(&dir, "App.jsx", "const c = '#FF0000';\n");

        let mut config = Config::default();
        config.engine.parallel = false;
        let engine = Engine::with_builtin_plugins(config);
        let result = engine.lint(&[jsx]);

        assert_eq!(result.files_processed, 1);
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_recount() {
        let mut result = LintResult::default();
        result.diagnostics.push(Diagnostic::new(
            "r",
            Severity::Error,
            "m",
            Location::new(PathBuf::from("f.css"), 1, 1),
        ));
        result.recount();
        assert_eq!(result.error_count, 1);
        assert_eq!(result.warning_count, 0);
    }
}
