//! Schemascope CLI - Headless-CMS Schema Audit
//!
//! Audits an introspected schema snapshot and prints or writes the strategic
//! audit report.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use schemascope::core::schema::EntryCounts;
use schemascope::io::reports::{self, ReportFormat};
use schemascope::io::schema_files;
use schemascope::{AuditConfig, AuditEngine};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless-CMS schema audit engine
#[derive(Parser)]
#[command(name = "schemascope")]
#[command(version = VERSION)]
#[command(about = "Audit headless-CMS content schemas for structural debt")]
#[command(long_about = "
Audit an introspected content schema for structural debt: duplicated and
versioned models, deep relation chains, tenancy enums, unused components,
and stale content. Produces a scored report with a prioritized issue list
and an effort-phased remediation roadmap.

Common Usage:

  # Audit a schema snapshot, print the text summary
  schemascope audit --schema schema.json

  # Include entry counts for content-health checks, write full JSON
  schemascope audit --schema schema.json --counts counts.json \\
      --format json --output report.json

  # Start from the default thresholds
  schemascope print-default-config > schemascope.yml
  schemascope audit --schema schema.json --config schemascope.yml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a schema snapshot and produce a report
    Audit(AuditArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a schemascope configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
struct AuditArgs {
    /// Schema snapshot JSON file
    #[arg(long, value_name = "FILE")]
    schema: PathBuf,

    /// Per-model entry counts JSON file
    #[arg(long, value_name = "FILE")]
    counts: Option<PathBuf>,

    /// Configuration YAML file (defaults apply when omitted)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Args)]
struct ValidateConfigArgs {
    /// Configuration YAML file to validate
    #[arg(value_name = "FILE")]
    config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full report as pretty-printed JSON
    Json,
    /// Human-readable text summary
    Summary,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Summary => ReportFormat::Summary,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Audit(args) => audit_command(args),
        Commands::PrintDefaultConfig => print_default_config(),
        Commands::ValidateConfig(args) => validate_config(args),
    }
}

fn audit_command(args: AuditArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            AuditConfig::from_yaml_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AuditConfig::default(),
    };

    let schema = schema_files::load_schema(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;
    let counts = match &args.counts {
        Some(path) => schema_files::load_counts(path)
            .with_context(|| format!("loading counts {}", path.display()))?,
        None => EntryCounts::empty(),
    };

    let engine = AuditEngine::new(config)?;
    let report = engine.audit(&schema, &counts);

    let format = ReportFormat::from(args.format);
    match &args.output {
        Some(path) => {
            reports::write_to_file(&report, format, path)
                .with_context(|| format!("writing report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", reports::render(&report, format)?),
    }
    Ok(())
}

fn print_default_config() -> anyhow::Result<()> {
    print!("{}", AuditConfig::default().to_yaml()?);
    Ok(())
}

fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {}", args.config.display()))?;
    AuditConfig::from_yaml_str(&raw)
        .with_context(|| format!("invalid configuration {}", args.config.display()))?;
    println!("Configuration {} is valid", args.config.display());
    Ok(())
}
