//! penguin-census - island population reports from penguin census data
//!
//! Loads a CSV of penguin observations and reports the most populous
//! island overall and per year, and the per-year share of each species
//! on each island.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, unreadable input, no valid records, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use loader::LoadOptions;
use models::{CensusReport, CensusSummary, ReportMetadata};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("penguin-census v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_census(&args) {
        error!("Census failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .penguin-census.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings. Logs go to stderr so
/// stdout carries only the report.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load, aggregate and report.
fn run_census(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let options = LoadOptions::try_from(&config.input).context("Invalid input settings")?;
    let input = args.input_path();

    info!("Loading records from {}", input.display());
    let records = loader::load(input, &options)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    info!("Loaded {} records", records.len());

    let fields = &options.fields;

    let population = if config.report.include_population {
        let result = analysis::most_populous(&records, fields).with_context(|| {
            format!(
                "Cannot find the most populous island: no record has both '{}' and '{}'",
                fields.island, fields.year
            )
        })?;
        info!("Most populous island overall: {}", result.overall);
        Some(result)
    } else {
        None
    };

    let distribution = if config.report.include_distribution {
        let result = analysis::species_island_distribution(&records, fields);
        if result.is_empty() {
            warn!("No record has species, island and year; distribution is empty");
        }
        Some(result)
    } else {
        None
    };

    let summary = config
        .report
        .include_summary
        .then(|| CensusSummary::from_records(&records, fields));

    let report = CensusReport {
        metadata: ReportMetadata {
            source: input.display().to_string(),
            generated_at: Utc::now(),
            total_records: records.len(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        summary,
        population,
        distribution,
    };

    let output = report::render_report(&report, config.general.format)?;

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path))?;
            info!("Report saved to {}", path);
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
