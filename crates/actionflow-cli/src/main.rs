//! # actionflow-cli
//!
//! Command-line interface for actionflow workflow files.
//!
//! `actionflow check` reports diagnostics with source excerpts,
//! `actionflow fmt` rewrites files in the canonical layout and
//! `actionflow config` shows or creates the configuration file.

mod config;
mod report;

use actionflow_semantic::Compilation;
use actionflow_syntax::Severity;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use config::Config;
use rayon::prelude::*;
use report::DiagnosticReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "actionflow")]
#[command(about = "Checker and formatter for workflow files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log what the tool is doing
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Use this config file instead of searching for one
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Report problems in workflow files")]
    Check {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
        /// Exit with an error on warnings too
        #[arg(long)]
        warnings_as_errors: bool,
        /// Lines of source shown around each problem
        #[arg(long, value_name = "LINES")]
        context: Option<usize>,
    },
    #[command(about = "Format workflow files in place")]
    Fmt {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
        /// Only report files that would change
        #[arg(long)]
        check: bool,
    },
    #[command(about = "Show the effective configuration")]
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
        /// Use the global config file instead of .actionflowrc
        #[arg(short, long)]
        global: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load(Path::new("."))?,
    };

    let success = match cli.command {
        Commands::Check {
            files,
            warnings_as_errors,
            context,
        } => {
            config.merge_cli_args(cli.no_color, warnings_as_errors, context);
            apply_color(&config);
            check_files(&files, &config)?
        }
        Commands::Fmt { files, check } => {
            config.merge_cli_args(cli.no_color, false, None);
            apply_color(&config);
            format_files(&files, &config, check)?
        }
        Commands::Config { init, global } => {
            config.merge_cli_args(cli.no_color, false, None);
            apply_color(&config);
            handle_config(&config, cli.config.as_deref(), init, global)?;
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("ACTIONFLOW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_color(config: &Config) {
    if !config.colored {
        colored::control::set_override(false);
    }
}

struct CheckedFile {
    path: PathBuf,
    source: String,
    compilation: Compilation,
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Returns `false` when a file has errors, or warnings with
/// `warnings_as_errors`.
fn check_files(files: &[PathBuf], config: &Config) -> Result<bool> {
    let checked = files
        .par_iter()
        .map(|path| -> Result<CheckedFile> {
            let source = read_file(path)?;
            let compilation = Compilation::new(source.as_str());
            debug!(file = %path.display(), diagnostics = compilation.diagnostics().len(), "checked");
            Ok(CheckedFile {
                path: path.clone(),
                source,
                compilation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut errors = 0;
    let mut warnings = 0;
    for file in &checked {
        for diagnostic in file.compilation.sorted_diagnostics() {
            match diagnostic.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
            }

            DiagnosticReport::new(diagnostic)
                .with_file(file.path.display().to_string())
                .with_source(&file.source)
                .with_context(config.context_lines)
                .display();
        }
    }

    let files_label = plural(checked.len(), "file");
    if errors == 0 && warnings == 0 {
        println!("{} {}", "✓".green().bold(), format!("No problems found in {}", files_label).dimmed());
        return Ok(true);
    }

    println!(
        "{} {}, {} in {}",
        "✗".red().bold(),
        plural(errors, "error").red().bold(),
        plural(warnings, "warning").yellow().bold(),
        files_label
    );

    Ok(errors == 0 && !(config.warnings_as_errors && warnings > 0))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

enum FormatOutcome {
    Unchanged,
    Changed(String),
    SyntaxErrors,
}

/// Formats every file. With `check`, nothing is written and `false` is
/// returned when any file would change.
fn format_files(files: &[PathBuf], config: &Config, check: bool) -> Result<bool> {
    let indent = config.indent();

    let outcomes = files
        .par_iter()
        .map(|path| -> Result<(&PathBuf, FormatOutcome)> {
            let source = read_file(path)?;
            let compilation = Compilation::new(source.as_str());
            let outcome = match actionflow_semantic::format(&compilation, &indent) {
                None => FormatOutcome::SyntaxErrors,
                Some(formatted) if formatted == source => FormatOutcome::Unchanged,
                Some(formatted) => FormatOutcome::Changed(formatted),
            };
            Ok((path, outcome))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut success = true;
    for (path, outcome) in outcomes {
        match outcome {
            FormatOutcome::Unchanged => debug!(file = %path.display(), "already formatted"),
            FormatOutcome::SyntaxErrors => {
                eprintln!(
                    "{} Skipped {}: fix its syntax errors first (see `actionflow check`)",
                    "⚠".yellow().bold(),
                    path.display()
                );
                success = false;
            }
            FormatOutcome::Changed(_) if check => {
                println!("{} Would reformat {}", "✗".red().bold(), path.display());
                success = false;
            }
            FormatOutcome::Changed(formatted) => {
                fs::write(path, formatted).with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{} Formatted {}", "✓".green().bold(), path.display());
            }
        }
    }

    Ok(success)
}

fn handle_config(config: &Config, explicit: Option<&Path>, init: bool, global: bool) -> Result<()> {
    if init {
        let path = if global {
            Config::global_path().context("Could not determine config directory")?
        } else {
            PathBuf::from(".actionflowrc")
        };
        Config::create_default(&path)?;
        println!("{} Created {}", "✓".green().bold(), path.display());
        return Ok(());
    }

    let location = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if global => Config::global_path().filter(|path| path.is_file()),
        None => Config::locate(Path::new(".")),
    };

    if global && location.is_none() {
        bail!("No global config file found");
    }

    match &location {
        Some(path) => println!("{} Configuration: {}", "⚙".cyan().bold(), path.display()),
        None => println!("{} Configuration: defaults (no config file found)", "⚙".cyan().bold()),
    }
    println!();

    let shown = match (&location, global) {
        (Some(path), true) => Config::load_from_file(path)?,
        _ => config.clone(),
    };
    let toml_string = toml::to_string_pretty(&shown).context("Failed to serialize config")?;
    for line in toml_string.lines() {
        match line.split_once(" = ") {
            Some((key, value)) => println!("  {} = {}", key.cyan(), value),
            None => println!("  {}", line),
        }
    }

    Ok(())
}
