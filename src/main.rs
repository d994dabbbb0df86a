//! anno-diff: compare two WebAnno annotation exports of the same text
//!
//! Writes one discrepancy log row per differing attribute, frame link or
//! unmatched frame.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use anno_diff::{
    cli,
    config::{AppConfig, DiffConfig, DiffPaths},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  WebAnno / INCEpTION UIMA CAS XMI",
        "\n\nOutput Formats:",
        "\n  csv, json, summary"
    )
}

#[derive(Parser)]
#[command(name = "anno-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Compare two annotation exports of the same text", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
#[command(after_help = "EXIT CODES:
    0  Comparison completed
    1  Discrepancies found (with --fail-on-change)
    2  Dangling links found (with --fail-on-warning)
    3  Error occurred (unreadable input, documents cannot be aligned)

EXAMPLES:
    # Write the discrepancy log
    anno-diff annotator-1.xmi annotator-2.xmi log.csv

    # Semicolon-separated log on stdout
    anno-diff a.xmi b.xmi - --delimiter ';'

    # Terminal summary in CI
    anno-diff a.xmi b.xmi - --format summary --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    diff: DiffArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments for the default comparison command
#[derive(Parser)]
struct DiffArgs {
    /// First annotation export (file 1)
    #[arg(value_name = "FILE_1", required = true)]
    left: Option<PathBuf>,

    /// Second annotation export (file 2)
    #[arg(value_name = "FILE_2", required = true)]
    right: Option<PathBuf>,

    /// Discrepancy log to write (`-` or omitted for stdout)
    #[arg(value_name = "LOG")]
    log: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Field delimiter of the csv log
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Text written for values that exist on one side only
    #[arg(long)]
    absent_marker: Option<String>,

    /// Label the value columns with the input file names
    #[arg(long)]
    file_names: bool,

    /// Exit with code 1 if any discrepancy is found
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 2 if any frame link is dangling
    #[arg(long)]
    fail_on_warning: bool,

    /// Compare sentences on a single thread
    #[arg(long)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate a JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate an example .anno-diff.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(mut cli: Cli) -> Result<i32> {
    match cli.command.take() {
        None => {
            let config = diff_config(&cli)?;
            cli::run_diff(config)
        }

        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "anno-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Some(Commands::Config { action }) => {
            run_config(action, &cli)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Merge CLI flags over the discovered config file.
fn diff_config(cli: &Cli) -> Result<DiffConfig> {
    let args = &cli.diff;
    let left = args.left.clone().context("FILE_1 is required")?;
    let right = args.right.clone().context("FILE_2 is required")?;

    let overrides = AppConfig::builder()
        .output_file(args.log.clone())
        .header_file_names(args.file_names)
        .parallel(!args.sequential)
        .fail_on_change(args.fail_on_change)
        .fail_on_warning(args.fail_on_warning)
        .quiet(cli.quiet)
        .build();

    let (mut app, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    // Explicit values win even when they equal the defaults
    if let Some(format) = args.format {
        app.output.format = format;
    }
    if let Some(delimiter) = args.delimiter {
        app.output.delimiter = delimiter;
    }
    if let Some(marker) = &args.absent_marker {
        app.output.absent_marker.clone_from(marker);
    }
    if cli.no_color {
        app.output.no_color = true;
    }

    Ok(DiffConfig::from_app_config(DiffPaths { left, right }, app))
}

fn run_config(action: ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = anno_diff::config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for path in anno_diff::config::config_search_dirs() {
                eprintln!("  {}", path.display());
            }
            eprintln!();
            match anno_diff::config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Schema { output } => {
            let schema = anno_diff::config::generate_json_schema()
                .context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".anno-diff.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = anno_diff::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
