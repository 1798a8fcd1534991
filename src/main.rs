//! sbom-merge: non-destructive CycloneDX SBOM merge tool

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_merge::{
    cli,
    codec::FormatPreference,
    config::{self, AppConfig, BehaviorConfig, ConfigPreset, DiffConfig, MergeCommandConfig},
    diff::DiffFormat,
    merge::MergeMode,
    pipeline::exit_codes,
};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported SBOM Formats:",
        "\n  CycloneDX: 1.2, 1.3, 1.4, 1.5, 1.6 (JSON, XML)",
        "\n\nMerge Modes:",
        "\n  merge, dependency"
    )
}

#[derive(Parser)]
#[command(name = "sbom-merge")]
#[command(version, long_version = build_long_version())]
#[command(about = "Non-destructive CycloneDX SBOM merge tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or no changes detected)
    1  Changes detected (diff --fail-on-change)
    3  Error occurred

EXAMPLES:
    # Merge two BOMs of the same product
    sbom-merge merge build.cdx.json runtime.cdx.json -O merged.cdx.json

    # Assemble a product BOM from per-part BOMs
    sbom-merge merge product.cdx.xml part-a.cdx.xml part-b.cdx.json --mode dependency

    # Check what a merge contributed
    sbom-merge diff build.cdx.json merged.cdx.json -o summary")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `merge` subcommand
#[derive(Parser)]
struct MergeArgs {
    /// Input BOMs, merged left to right; the first one takes precedence
    #[arg(required = true, num_args = 2..)]
    inputs: Vec<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Indent the output document
    #[arg(long)]
    pretty: bool,

    /// How documents are combined
    #[arg(long, value_enum)]
    mode: Option<MergeMode>,

    /// Output encoding (auto follows the first input)
    #[arg(long, value_enum)]
    format: Option<FormatPreference>,

    /// Start from a named preset (default, compact, aggregate)
    #[arg(long)]
    preset: Option<String>,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline SBOM
    old: PathBuf,

    /// Path to the new SBOM
    new: PathBuf,

    /// Report format
    #[arg(short, long, value_enum)]
    output: Option<DiffFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any changes detected
    #[arg(long)]
    fail_on_change: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge two or more BOMs into one
    Merge(MergeArgs),

    /// Compare two BOMs
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate a man page and print it to stdout
    Man,
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-merge.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the merged document
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
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Layer a preset, the config file, and CLI overrides, in that order.
fn effective_config(
    config_path: Option<&Path>,
    preset: Option<&str>,
    overrides: &AppConfig,
) -> Result<AppConfig> {
    let (file_config, loaded_from) = config::load_or_default(config_path);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let mut effective = match preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                let names: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                format!("Unknown preset '{name}' (available: {})", names.join(", "))
            })?;
            AppConfig::from_preset(preset)
        }
        None => AppConfig::default(),
    };
    effective.merge(&file_config);
    effective.merge(overrides);
    Ok(effective)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Merge(args) => {
            let overrides = AppConfig::builder()
                .pretty(args.pretty)
                .output_file(args.output_file)
                .quiet(cli.quiet)
                .build();

            let mut app =
                effective_config(cli.config.as_deref(), args.preset.as_deref(), &overrides)?;
            // explicit enum flags win even when they name the default
            if let Some(mode) = args.mode {
                app.merge.mode = mode;
            }
            if let Some(format) = args.format {
                app.merge.format = format;
            }
            cli::run_merge(MergeCommandConfig::from_app(args.inputs, &app))
        }

        Commands::Diff(args) => {
            let overrides = AppConfig {
                output: config::OutputConfig {
                    file: args.output_file,
                    ..config::OutputConfig::default()
                },
                behavior: BehaviorConfig {
                    quiet: cli.quiet,
                    fail_on_change: args.fail_on_change,
                },
                ..AppConfig::default()
            };

            let mut app = effective_config(cli.config.as_deref(), None, &overrides)?;
            if let Some(format) = args.output {
                app.output.diff_format = format;
            }
            cli::run_diff(DiffConfig::from_app(args.old, args.new, &app))
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-merge", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Man => {
            let man = clap_mangen::Man::new(Cli::command());
            let mut buf = Vec::new();
            man.render(&mut buf).context("failed to render man page")?;
            io::stdout().write_all(&buf)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(config_path);
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for dir in config::config_search_dirs() {
                eprintln!("  {}", dir.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(config_path) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".sbom-merge.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_full_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
