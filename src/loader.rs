//! CSV loading.
//!
//! Reads a delimited file with a header row into [`Record`]s, one per data
//! row, in file order.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::InputConfig;
use crate::error::{CensusError, CensusResult};
use crate::models::{FieldNames, Record};

/// Options for reading census CSV files.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Columns the aggregators need; missing ones are reported.
    pub fields: FieldNames,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            fields: FieldNames::default(),
        }
    }
}

impl TryFrom<&InputConfig> for LoadOptions {
    type Error = CensusError;

    fn try_from(config: &InputConfig) -> CensusResult<Self> {
        Ok(Self {
            delimiter: parse_delimiter(&config.delimiter)?,
            fields: config.field_names(),
        })
    }
}

/// Parse a delimiter setting. Accepts one ASCII character, or `\t`/`tab`.
pub fn parse_delimiter(value: &str) -> CensusResult<u8> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(CensusError::InvalidDelimiter(value.to_string())),
        },
    }
}

/// Load all records from a CSV file.
pub fn load(path: &Path, options: &LoadOptions) -> CensusResult<Vec<Record>> {
    debug!("Opening {}", path.display());
    let file = File::open(path)?;
    load_from_reader(file, options)
}

/// Load all records from any reader producing CSV text.
///
/// Rows with a different number of columns than the header are an error.
/// Empty cells become absent fields; other values are kept verbatim.
pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> CensusResult<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    for column in options.fields.all() {
        if !headers.iter().any(|h| h == column) {
            warn!("Input has no '{}' column; every record will be skipped", column);
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.as_str(), Some(value).filter(|v| !v.is_empty())))
            .collect();
        records.push(record);
    }

    debug!("Loaded {} records with {} columns", records.len(), headers.len());
    Ok(records)
}
