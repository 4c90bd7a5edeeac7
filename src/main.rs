//! dslint CLI - Design System Linter
//!
//! Lints JS/JSX and CSS sources for design-system compliance.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dslint::config::{ColorMode, Config, OutputFormat};
use dslint::engine::Engine;
use dslint::fixer::Fixer;
use dslint::output::{
    CompactFormatter, GithubFormatter, JsonFormatter, OutputFormatter, TextFormatter,
};
use dslint::plugin::Plugin;
use dslint::rule::RuleMeta;
use dslint::validate::{print_report, Validator};
use dslint::watch::Watcher;
use dslint::Severity;
use glob::glob;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dslint",
    version,
    about = "Design System Linter",
    long_about = "A fast, modular linter enforcing design-system compliance \
                  (color tokens, button variants, icon naming, text casing) \
                  in JS/JSX and CSS sources."
)]
struct Cli {
    /// Files or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Only enable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<String>>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<MinSeverity>,

    /// Show statistics
    #[arg(long)]
    stats: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Auto-fix issues where possible (dry-run by default, use with --write to apply)
    #[arg(long)]
    fix: bool,

    /// Write fixes to files (requires --fix)
    #[arg(long, requires = "fix")]
    write: bool,

    /// Include unsafe fixes (may change code behavior)
    #[arg(long)]
    unsafe_fixes: bool,

    /// Show diff of changes instead of applying fixes
    #[arg(long)]
    diff: bool,

    /// Show all fixes that would be applied
    #[arg(long)]
    show_fixes: bool,

    /// Exit with 0 even if errors are found
    #[arg(long)]
    exit_zero: bool,

    /// Show source context lines around errors
    #[arg(long, default_value = "0")]
    context: usize,

    /// Watch files and re-lint on changes
    #[arg(long, short = 'w')]
    watch: bool,

    /// Clear screen before each lint run (use with --watch)
    #[arg(long, requires = "watch")]
    clear: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show detailed information about a rule
    Explain {
        /// Rule ID to explain
        rule_id: String,
    },
    /// Initialize a configuration file
    Init {
        /// Preset to use (recommended, strict, minimal)
        #[arg(long, default_value = "recommended")]
        preset: String,

        /// Output format (yaml, json)
        #[arg(long, default_value = "yaml")]
        output_format: String,
    },
    /// Run the full design-system validation suite
    Validate {
        /// Project directory to validate
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Compact,
    Json,
    Github,
}

#[derive(Clone, Copy, ValueEnum)]
enum MinSeverity {
    Info,
    Warning,
    Error,
}

/// Print a rule in a consistent one-line format
fn print_rule(meta: &RuleMeta) {
    let severity = match meta.severity {
        Severity::Error => "error".red(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".blue(),
    };

    let fixable = if meta.fixable { " [fixable]".green() } else { "".normal() };

    println!(
        "    {} [{}] ({}){}",
        meta.id.cyan(),
        severity,
        meta.kind,
        fixable
    );
    println!("      {}", meta.description);
}

/// Print detailed rule metadata
fn explain_rule(meta: &RuleMeta) {
    println!("{}", "Rule Details".bold());
    println!();
    println!("  {}: {}", "ID".bold(), meta.id.cyan());
    println!(
        "  {}: {}",
        "Severity".bold(),
        match meta.severity {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".blue(),
        }
    );
    println!("  {}: {}", "Kind".bold(), meta.kind);
    println!("  {}: {}", "Fixable".bold(), if meta.fixable { "yes" } else { "no" });
    println!(
        "  {}: {}",
        "Recommended".bold(),
        if meta.recommended { "yes" } else { "no" }
    );
    println!();
    println!("  {}", "Description".bold());
    println!("  {}", meta.description);
}

/// Handle the explain subcommand
fn handle_explain(rule_id: &str, engine: &Engine) {
    for plugin in engine.plugins() {
        if let Some(meta) = plugin.rule_metas().into_iter().find(|m| m.id == rule_id) {
            explain_rule(meta);
            return;
        }
    }

    eprintln!("{}: Rule '{}' not found", "error".red().bold(), rule_id);
    eprintln!();
    eprintln!("Use {} to see all available rules", "--list-rules".cyan());
    std::process::exit(1);
}

/// Handle the init subcommand
fn handle_init(preset: &str, output_format: &str) {
    let config = match Config::preset(preset) {
        Some(c) => c,
        None => {
            eprintln!(
                "{}: Unknown preset '{}'. Available: recommended, strict, minimal",
                "error".red().bold(),
                preset
            );
            std::process::exit(1);
        }
    };

    let filename = if output_format == "json" {
        ".dslintrc.json"
    } else {
        ".dslintrc.yaml"
    };

    if std::path::Path::new(filename).exists() {
        eprintln!(
            "{}: {} already exists. Remove it first to reinitialize.",
            "error".red().bold(),
            filename
        );
        std::process::exit(1);
    }

    let content = if output_format == "json" {
        serde_json::to_string_pretty(&config).unwrap_or_default()
    } else {
        format!(
            "# dslint configuration\n# Generated with: dslint init --preset {}\n\n{}",
            preset,
            serde_yaml::to_string(&config).unwrap_or_default()
        )
    };

    if let Err(e) = std::fs::write(filename, content) {
        eprintln!(
            "{}: Failed to write {}: {}",
            "error".red().bold(),
            filename,
            e
        );
        std::process::exit(1);
    }

    println!("{} Created {}", "success".green().bold(), filename);
    println!();
    println!("Next steps:");
    println!("  1. Review and customize the configuration");
    println!("  2. Run {} to lint your sources", "dslint 'src/**/*.jsx'".cyan());
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::load(config_path).unwrap_or_else(|e| {
            eprintln!("{}: Failed to load config: {}", "error".red().bold(), e);
            std::process::exit(1);
        })
    } else {
        Config::load_default().unwrap_or_default()
    };

    // Merge CLI arguments
    let format = match cli.format {
        Format::Text => OutputFormat::Text,
        Format::Compact => OutputFormat::Compact,
        Format::Json => OutputFormat::Json,
        Format::Github => OutputFormat::Github,
    };
    config.merge_cli(
        Some(format),
        Some(cli.verbose),
        Some(cli.jobs),
        cli.disable.clone(),
        cli.select.clone(),
    );

    let mut engine = Engine::with_builtin_plugins(config.clone());
    if cli.context > 0 {
        engine.set_context_lines(cli.context);
    }

    // Handle subcommands
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Explain { rule_id } => {
                handle_explain(rule_id, &engine);
                return;
            }
            Commands::Init {
                preset,
                output_format,
            } => {
                handle_init(preset, output_format);
                return;
            }
            Commands::Validate { path } => {
                let validator = Validator::new(&config, path);
                let report = validator.run();
                print_report(&report);
                std::process::exit(report.exit_code());
            }
        }
    }

    // Handle --list-rules
    if cli.list_rules {
        println!("{}", "Available rules:".bold());
        println!();
        for plugin in engine.plugins() {
            println!(
                "  {} ({} rules):",
                format!("{} plugin", plugin.id()).cyan(),
                plugin.rule_metas().len()
            );
            for meta in plugin.rule_metas() {
                print_rule(meta);
            }
            println!();
        }
        return;
    }

    if cli.files.is_empty() {
        eprintln!("{}: No files specified", "error".red().bold());
        eprintln!();
        eprintln!("Usage: dslint [OPTIONS] <FILES>...");
        eprintln!();
        eprintln!("For more information, try '--help'");
        std::process::exit(2);
    }

    // Expand glob patterns
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in &cli.files {
        match glob(pattern) {
            Ok(paths) => {
                for entry in paths.flatten() {
                    if entry.is_file() && !config.is_excluded(&entry) {
                        files.push(entry);
                    }
                }
            }
            Err(e) => {
                eprintln!(
                    "{}: Invalid pattern '{}': {}",
                    "error".red().bold(),
                    pattern,
                    e
                );
                std::process::exit(1);
            }
        }
    }

    if files.is_empty() {
        eprintln!("{}: No files found to lint", "error".red().bold());
        std::process::exit(1);
    }

    if cli.verbose {
        eprintln!("Linting {} files...", files.len());
    }

    // Run linting
    let mut result = engine.lint(&files);

    // Filter by minimum severity
    if let Some(min_sev) = cli.min_severity {
        let min = match min_sev {
            MinSeverity::Info => Severity::Info,
            MinSeverity::Warning => Severity::Warning,
            MinSeverity::Error => Severity::Error,
        };
        result.diagnostics.retain(|d| d.severity >= min);
        result.recount();
    }

    // Handle fix-related flags
    if cli.fix || cli.diff || cli.show_fixes {
        let dry_run = !cli.write;
        let mut fixer = Fixer::new(dry_run);

        if cli.diff {
            fixer = fixer.with_diff_mode();
        } else if cli.show_fixes {
            fixer = fixer.with_show_only();
        }
        if cli.unsafe_fixes {
            fixer = fixer.with_unsafe_fixes(true);
        }

        fixer.collect_from_diagnostics(&result.diagnostics);

        if cli.show_fixes {
            println!("{}", fixer.format_fixes());
        } else if fixer.pending_count() > 0 {
            let fix_result = fixer.apply_all();

            if cli.diff {
                println!("{}", fixer.format_diffs(&fix_result));
                if fix_result.fixes_skipped > 0 {
                    eprintln!(
                        "{}: {} fixes skipped (unsafe; use --unsafe-fixes to include)",
                        "note".blue(),
                        fix_result.fixes_skipped
                    );
                }
            } else if dry_run {
                eprintln!(
                    "{}: {} fixes available ({} safe, {} unsafe)",
                    "dry-run".cyan(),
                    fixer.pending_count(),
                    fix_result.safe_fixes_applied,
                    fix_result.unsafe_fixes_applied
                );
                eprintln!("Use --write to apply fixes");
            } else {
                eprintln!(
                    "Applied {} fixes to {} files ({} safe, {} unsafe)",
                    fix_result.fixes_applied,
                    fix_result.files_modified,
                    fix_result.safe_fixes_applied,
                    fix_result.unsafe_fixes_applied
                );
                if fix_result.fixes_failed > 0 {
                    eprintln!(
                        "{}: {} fixes failed",
                        "warning".yellow(),
                        fix_result.fixes_failed
                    );
                }
                if fix_result.fixes_skipped > 0 {
                    eprintln!(
                        "{}: {} fixes skipped (unsafe; use --unsafe-fixes to include)",
                        "note".blue(),
                        fix_result.fixes_skipped
                    );
                }
            }
        } else if cli.verbose {
            eprintln!("No auto-fixes available");
        }
    }

    // Create formatter
    let formatter: Box<dyn OutputFormatter> = match config.output.format {
        OutputFormat::Text => {
            let mut f = TextFormatter::new();
            if cli.no_color || config.output.color == ColorMode::Never {
                f = f.without_color();
            }
            f.show_stats = cli.stats || config.output.statistics;
            Box::new(f)
        }
        OutputFormat::Compact => Box::new(CompactFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty()),
        OutputFormat::Github => Box::new(GithubFormatter::new()),
    };

    print!("{}", formatter.format(&result));

    // Watch mode
    if cli.watch {
        eprintln!();
        eprintln!(
            "{} Watching for changes... (press Ctrl+C to stop)",
            "[watch]".cyan().bold()
        );

        let extensions = engine.extensions();
        let watch_paths: Vec<PathBuf> = files
            .iter()
            .map(|f| {
                f.parent()
                    .unwrap_or(std::path::Path::new("."))
                    .to_path_buf()
            })
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        match Watcher::new(&watch_paths, &extensions) {
            Ok(watcher) => loop {
                if let Some(event) = watcher.wait() {
                    if cli.clear {
                        print!("\x1B[2J\x1B[1;1H");
                    }

                    let lint_files: Vec<PathBuf> =
                        event.paths.into_iter().filter(|p| p.exists()).collect();

                    if !lint_files.is_empty() {
                        let result = engine.lint(&lint_files);
                        print!("{}", formatter.format(&result));
                    }

                    eprintln!();
                    eprintln!("{} Watching for changes...", "[watch]".cyan().bold());
                }
            },
            Err(e) => {
                eprintln!(
                    "{}: Failed to start file watcher: {}",
                    "error".red().bold(),
                    e
                );
                std::process::exit(1);
            }
        }
    }

    let exit_code = if cli.exit_zero { 0 } else { result.exit_code() };
    std::process::exit(exit_code);
}
