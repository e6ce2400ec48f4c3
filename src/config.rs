//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.penguin-census.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::models::FieldNames;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".penguin-census.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input file settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// File to write the report to. Printed to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// How to read the input CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter: a single character, or `tab`.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Column holding the species name.
    #[serde(default = "default_species_field")]
    pub species_field: String,

    /// Column holding the island name.
    #[serde(default = "default_island_field")]
    pub island_field: String,

    /// Column holding the observation year.
    #[serde(default = "default_year_field")]
    pub year_field: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            species_field: default_species_field(),
            island_field: default_island_field(),
            year_field: default_year_field(),
        }
    }
}

impl InputConfig {
    pub fn field_names(&self) -> FieldNames {
        FieldNames {
            species: self.species_field.clone(),
            island: self.island_field.clone(),
            year: self.year_field.clone(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_species_field() -> String {
    "species".to_string()
}

fn default_island_field() -> String {
    "island".to_string()
}

fn default_year_field() -> String {
    "year".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the most populous island section.
    #[serde(default = "default_true")]
    pub include_population: bool,

    /// Include the species distribution section.
    #[serde(default = "default_true")]
    pub include_distribution: bool,

    /// Include dataset record counts.
    #[serde(default = "default_true")]
    pub include_summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_population: true,
            include_distribution: true,
            include_summary: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only arguments the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        if let Some(ref delimiter) = args.delimiter {
            self.input.delimiter = delimiter.clone();
        }
        if let Some(ref field) = args.species_field {
            self.input.species_field = field.clone();
        }
        if let Some(ref field) = args.island_field {
            self.input.island_field = field.clone();
        }
        if let Some(ref field) = args.year_field {
            self.input.year_field = field.clone();
        }

        // Flags can only switch sections off
        if args.no_population {
            self.report.include_population = false;
        }
        if args.no_distribution {
            self.report.include_distribution = false;
        }
        if args.no_summary {
            self.report.include_summary = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
