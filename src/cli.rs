//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::loader::parse_delimiter;

/// penguin-census - island population reports from penguin census data
///
/// Reads a CSV of penguin observations (species, island, year) and reports
/// the most populous island overall and per year, plus how each species is
/// spread across islands every year.
///
/// Examples:
///   penguin-census penguins.csv
///   penguin-census penguins.csv --format markdown --output census.md
///   penguin-census data.tsv --delimiter tab --island-field Island
///   penguin-census --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file with a header row
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (text, markdown, json)
    ///
    /// Can also be set via PENGUIN_CENSUS_FORMAT or .penguin-census.toml.
    #[arg(short, long, value_name = "FORMAT", env = "PENGUIN_CENSUS_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .penguin-census.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Field delimiter: one character, or "tab"
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Column holding the species name
    #[arg(long, value_name = "NAME")]
    pub species_field: Option<String>,

    /// Column holding the island name
    #[arg(long, value_name = "NAME")]
    pub island_field: Option<String>,

    /// Column holding the observation year
    #[arg(long, value_name = "NAME")]
    pub year_field: Option<String>,

    /// Leave out the most populous island section
    #[arg(long)]
    pub no_population: bool,

    /// Leave out the species distribution section
    #[arg(long)]
    pub no_distribution: bool,

    /// Leave out the dataset summary section
    #[arg(long)]
    pub no_summary: bool,

    /// Generate a default .penguin-census.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain console text (default)
    #[default]
    Text,
    /// Markdown tables
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Input path; empty when only --init-config was given.
    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.no_population && self.no_distribution {
            return Err(
                "Nothing to report: --no-population and --no-distribution are both set"
                    .to_string(),
            );
        }

        if let Some(ref delimiter) = self.delimiter {
            parse_delimiter(delimiter).map_err(|e| e.to_string())?;
        }

        for (flag, value) in [
            ("--species-field", &self.species_field),
            ("--island-field", &self.island_field),
            ("--year-field", &self.year_field),
        ] {
            if value.as_deref().is_some_and(|name| name.trim().is_empty()) {
                return Err(format!("{} must not be empty", flag));
            }
        }

        let input = self.input_path();
        if !input.exists() {
            return Err(format!("Input file does not exist: {}", input.display()));
        }
        if !input.is_file() {
            return Err(format!("Input path is not a file: {}", input.display()));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_args(input: PathBuf) -> Args {
        Args {
            input: Some(input),
            output: None,
            format: None,
            config: None,
            verbose: false,
            quiet: false,
            delimiter: None,
            species_field: None,
            island_field: None,
            year_field: None,
            no_population: false,
            no_distribution: false,
            no_summary: false,
            init_config: false,
        }
    }

    fn input_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "species,island,year").unwrap();
        file
    }

    #[test]
    fn test_validation_ok() {
        let file = input_file();
        let args = make_args(file.path().to_path_buf());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = make_args(dir.path().join("nope.csv"));
        assert!(args.validate().is_err());

        let args = make_args(dir.path().to_path_buf());
        assert!(args.validate().unwrap_err().contains("not a file"));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let file = input_file();
        let mut args = make_args(file.path().to_path_buf());
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());

        let mut args = make_args(file.path().to_path_buf());
        args.no_population = true;
        args.no_distribution = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_bad_delimiter_and_fields() {
        let file = input_file();
        let mut args = make_args(file.path().to_path_buf());
        args.delimiter = Some("::".to_string());
        assert!(args.validate().is_err());

        let mut args = make_args(file.path().to_path_buf());
        args.island_field = Some("  ".to_string());
        assert!(args.validate().unwrap_err().contains("--island-field"));
    }

    #[test]
    fn test_init_config_skips_validation() {
        let args = Args::parse_from(["penguin-census", "--init-config"]);
        assert!(args.input.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_input_required_without_init_config() {
        assert!(Args::try_parse_from(["penguin-census"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(PathBuf::from("penguins.csv"));
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
