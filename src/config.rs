//! Configuration system for the linter
//!
//! Reads configuration from:
//! - `.dslintrc.yaml` / `.dslintrc.json` (project-level)
//! - `~/.dslintrc.yaml` (user-level)

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enable parallel processing
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,

    /// Verbose output
    pub verbose: bool,

    /// Show statistics
    pub statistics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: ColorMode::Auto,
            verbose: false,
            statistics: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Compact,
    Json,
    Github,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "compact" => Ok(OutputFormat::Compact),
            "json" => Ok(OutputFormat::Json),
            "github" => Ok(OutputFormat::Github),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// File handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Include patterns
    pub include: Vec<String>,

    /// Exclude patterns
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            include: vec![
                "src/**/*.js".to_string(),
                "src/**/*.jsx".to_string(),
                "src/**/*.ts".to_string(),
                "src/**/*.tsx".to_string(),
                "src/**/*.css".to_string(),
            ],
            // the token definition file is where raw hex values live
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
                "**/design-tokens.css".to_string(),
            ],
        }
    }
}

/// Design-system validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Path to the design-token definition file
    pub tokens_file: PathBuf,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            tokens_file: PathBuf::from("src/styles/design-tokens.css"),
        }
    }
}

/// Rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rules
    pub disabled: Vec<String>,

    /// Enabled rules (empty = all)
    pub enabled: Vec<String>,

    /// Severity overrides (rule_id -> severity)
    pub severity: HashMap<String, Severity>,

    /// Per-file rule ignores (glob pattern -> rule IDs, or "all")
    pub per_file: HashMap<String, Vec<String>>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extend from other configuration files or presets
    pub extends: Vec<String>,

    /// Engine settings
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// File handling settings
    pub files: FilesConfig,

    /// Rule configuration
    pub rules: RulesConfig,

    /// Design-system validation settings
    pub validate: ValidateConfig,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a preset configuration by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::preset_recommended()),
            "strict" => Some(Self::preset_strict()),
            "minimal" => Some(Self::preset_minimal()),
            _ => None,
        }
    }

    /// Recommended preset - every rule at its default severity
    /// (text casing warns, everything else errors)
    fn preset_recommended() -> Self {
        Self::default()
    }

    /// Strict preset - casing violations fail the build too
    fn preset_strict() -> Self {
        let mut config = Self::default();
        config
            .rules
            .severity
            .insert("text-casing-compliance".to_string(), Severity::Error);
        config
    }

    /// Minimal preset - only rules that fail builds
    fn preset_minimal() -> Self {
        let mut config = Self::default();
        config
            .rules
            .disabled
            .push("text-casing-compliance".to_string());
        config
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_depth(path, 0)
    }

    /// Load with recursion depth limit (to prevent extends cycles)
    fn load_with_depth(path: &Path, depth: usize) -> Result<Self, ConfigError> {
        const MAX_DEPTH: usize = 10;
        if depth >= MAX_DEPTH {
            return Err(ConfigError::Invalid(
                "maximum config inheritance depth exceeded".to_string(),
            ));
        }

        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let mut config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "unknown config file format: {}",
                    ext
                )))
            }
        };

        if !config.extends.is_empty() {
            let base_dir = path.parent().unwrap_or(Path::new("."));
            let mut base_config = Self::default();

            for extend in &config.extends.clone() {
                let extended = if let Some(preset) = Self::preset(extend) {
                    preset
                } else {
                    let extend_path = if Path::new(extend).is_absolute() {
                        PathBuf::from(extend)
                    } else {
                        base_dir.join(extend)
                    };
                    Self::load_with_depth(&extend_path, depth + 1)?
                };
                base_config.merge(extended);
            }

            base_config.merge(config);
            config = base_config;
        }

        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        if other.engine.jobs != 0 {
            self.engine.jobs = other.engine.jobs;
        }
        self.engine.parallel = other.engine.parallel;

        if other.output.format != OutputFormat::Text {
            self.output.format = other.output.format;
        }
        if other.output.verbose {
            self.output.verbose = true;
        }
        if other.output.color != ColorMode::Auto {
            self.output.color = other.output.color;
        }

        self.files.include.extend(other.files.include);
        self.files.exclude.extend(other.files.exclude);

        self.rules.disabled.extend(other.rules.disabled);
        if !other.rules.enabled.is_empty() {
            self.rules.enabled = other.rules.enabled;
        }
        self.rules.severity.extend(other.rules.severity);
        for (pattern, rules) in other.rules.per_file {
            self.rules.per_file.entry(pattern).or_default().extend(rules);
        }

        if other.validate.tokens_file != ValidateConfig::default().tokens_file {
            self.validate.tokens_file = other.validate.tokens_file;
        }
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_names = [
            ".dslintrc.yaml",
            ".dslintrc.yml",
            ".dslintrc.json",
            "dslint.yaml",
            "dslint.yml",
            "dslint.json",
        ];

        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            for name in &config_names {
                let path = home.join(name);
                if path.exists() {
                    return Self::load(&path);
                }
            }
        }

        Ok(Self::default())
    }

    /// Names of config files recognized in a project directory
    pub fn project_config_names() -> &'static [&'static str] {
        &[
            ".dslintrc.yaml",
            ".dslintrc.yml",
            ".dslintrc.json",
            "dslint.yaml",
            "dslint.yml",
            "dslint.json",
        ]
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        verbose: Option<bool>,
        jobs: Option<usize>,
        disabled_rules: Option<Vec<String>>,
        enabled_rules: Option<Vec<String>>,
    ) {
        if let Some(f) = format {
            self.output.format = f;
        }
        if let Some(v) = verbose {
            self.output.verbose = v;
        }
        if let Some(j) = jobs {
            self.engine.jobs = j;
        }
        if let Some(disabled) = disabled_rules {
            self.rules.disabled.extend(disabled);
        }
        if let Some(enabled) = enabled_rules {
            self.rules.enabled = enabled;
        }
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled.iter().any(|r| r == rule_id) {
            return false;
        }

        if !self.rules.enabled.is_empty() {
            return self.rules.enabled.iter().any(|r| r == rule_id);
        }

        true
    }

    /// Get severity override for a rule
    pub fn get_severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.severity.get(rule_id).copied()
    }

    /// Check if a rule should be ignored for a file
    pub fn should_ignore_rule_for_file(&self, rule_id: &str, file_path: &Path) -> bool {
        let file_str = file_path.to_string_lossy();

        for (pattern, rules) in &self.rules.per_file {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_str.as_ref())
                    && (rules.iter().any(|r| r == "all") || rules.iter().any(|r| r == rule_id))
                {
                    return true;
                }
            }
        }

        false
    }

    /// Check if a file is excluded by the configured patterns
    pub fn is_excluded(&self, file_path: &Path) -> bool {
        let file_str = file_path.to_string_lossy();
        for pattern in &self.files.exclude {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(file_str.as_ref()) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert!(config.engine.parallel);
        assert_eq!(config.engine.jobs, 0);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.files.include.iter().any(|p| p.ends_with("*.jsx")));
        assert!(config
            .files
            .exclude
            .iter()
            .any(|p| p.contains("design-tokens.css")));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "github".parse::<OutputFormat>().unwrap(),
            OutputFormat::Github
        );
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_merge_cli() {
        let mut config = Config::new();
        config.merge_cli(
            Some(OutputFormat::Json),
            Some(true),
            Some(4),
            Some(vec!["text-casing-compliance".to_string()]),
            None,
        );

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.verbose);
        assert_eq!(config.engine.jobs, 4);
        assert!(!config.is_rule_enabled("text-casing-compliance"));
    }

    #[test]
    fn test_rule_enabled() {
        let mut config = Config::new();

        assert!(config.is_rule_enabled("no-hardcoded-colors"));

        config.rules.disabled.push("font-usage".to_string());
        assert!(!config.is_rule_enabled("font-usage"));
        assert!(config.is_rule_enabled("no-hardcoded-colors"));

        config.rules.enabled = vec!["no-hardcoded-colors".to_string()];
        assert!(config.is_rule_enabled("no-hardcoded-colors"));
        assert!(!config.is_rule_enabled("button-variant-compliance"));
    }

    #[test]
    fn test_severity_override() {
        let mut config = Config::new();
        config
            .rules
            .severity
            .insert("text-casing-compliance".to_string(), Severity::Error);

        assert_eq!(
            config.get_severity_override("text-casing-compliance"),
            Some(Severity::Error)
        );
        assert_eq!(config.get_severity_override("font-usage"), None);
    }

    #[test]
    fn test_per_file_ignores() {
        let mut config = Config::new();
        config.rules.per_file.insert(
            "**/legacy/**".to_string(),
            vec!["no-hardcoded-colors".to_string()],
        );

        assert!(config.should_ignore_rule_for_file(
            "no-hardcoded-colors",
            Path::new("src/legacy/Theme.jsx")
        ));
        assert!(!config.should_ignore_rule_for_file(
            "no-hardcoded-colors",
            Path::new("src/components/Theme.jsx")
        ));
        assert!(!config
            .should_ignore_rule_for_file("font-usage", Path::new("src/legacy/Theme.jsx")));
    }

    #[test]
    fn test_excluded_files() {
        let config = Config::new();
        assert!(config.is_excluded(Path::new("src/styles/design-tokens.css")));
        assert!(config.is_excluded(Path::new("web/node_modules/pkg/index.js")));
        assert!(!config.is_excluded(Path::new("src/components/Button.jsx")));
    }

    #[test]
    fn test_presets() {
        let strict = Config::preset("strict").unwrap();
        assert_eq!(
            strict.get_severity_override("text-casing-compliance"),
            Some(Severity::Error)
        );

        let minimal = Config::preset("minimal").unwrap();
        assert!(!minimal.is_rule_enabled("text-casing-compliance"));

        assert!(Config::preset("recommended").is_some());
        assert!(Config::preset("bogus").is_none());
    }

    #[test]
    fn test_yaml_deserialize() {
        let yaml = r#"
engine:
  parallel: false
  jobs: 4
output:
  format: json
  verbose: true
rules:
  disabled:
    - text-casing-compliance
  severity:
    font-usage: warning
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.engine.parallel);
        assert_eq!(config.engine.jobs, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.verbose);
        assert!(!config.is_rule_enabled("text-casing-compliance"));
        assert_eq!(
            config.get_severity_override("font-usage"),
            Some(Severity::Warning)
        );
    }
}
