//! Data models for the census tool.
//!
//! This module contains the record shape produced by the loader and the
//! result structures produced by the aggregators and consumed by the report
//! generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::required_fields;

/// A single observation: field name to string value.
///
/// Absent fields and empty values are both treated as missing by
/// [`Record::field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field. A `None` value leaves the field absent.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.fields.insert(name, value.into());
            }
            None => {
                self.fields.remove(&name);
            }
        }
    }

    /// Returns the value of a field if it is present and non-empty.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Number of fields carrying a value (possibly empty).
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Names of the columns the aggregators read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub species: String,
    pub island: String,
    pub year: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            species: "species".to_string(),
            island: "island".to_string(),
            year: "year".to_string(),
        }
    }
}

impl FieldNames {
    /// All configured column names, in species/island/year order.
    pub fn all(&self) -> [&str; 3] {
        [self.species.as_str(), self.island.as_str(), self.year.as_str()]
    }
}

/// Most populous island overall and per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationResult {
    /// Island with the highest record count across the whole dataset.
    pub overall: String,
    /// Year to the island with the highest record count in that year.
    pub per_year: BTreeMap<String, String>,
}

/// Island to percentage of a species' yearly records observed there.
pub type IslandShares = BTreeMap<String, f64>;

/// Species to its island shares.
pub type SpeciesShares = BTreeMap<String, IslandShares>;

/// Year to species to island to percentage, rounded to two decimals.
pub type DistributionResult = BTreeMap<String, SpeciesShares>;

/// Counts describing the loaded dataset and what each aggregation kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusSummary {
    /// Records produced by the loader.
    pub total_records: usize,
    /// Records with both island and year.
    pub population_records: usize,
    pub population_skipped: usize,
    /// Records with species, island and year.
    pub distribution_records: usize,
    pub distribution_skipped: usize,
    /// Valid-record count per island.
    pub island_counts: BTreeMap<String, usize>,
    /// Distinct species among fully populated records.
    pub species: BTreeSet<String>,
    /// Distinct years among fully populated records.
    pub years: BTreeSet<String>,
}

impl CensusSummary {
    /// Creates a summary from the loaded records.
    pub fn from_records(records: &[Record], fields: &FieldNames) -> Self {
        let mut summary = Self {
            total_records: records.len(),
            ..Self::default()
        };

        for record in records {
            let population_fields = [fields.island.as_str(), fields.year.as_str()];
            if let Some([island, _]) = required_fields(record, population_fields) {
                summary.population_records += 1;
                *summary
                    .island_counts
                    .entry(island.to_string())
                    .or_insert(0) += 1;
            }

            if let Some([species, _, year]) = required_fields(record, fields.all()) {
                summary.distribution_records += 1;
                summary.species.insert(species.to_string());
                summary.years.insert(year.to_string());
            }
        }

        summary.population_skipped = summary.total_records - summary.population_records;
        summary.distribution_skipped = summary.total_records - summary.distribution_records;
        summary
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the input file.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records loaded.
    pub total_records: usize,
    /// Time spent loading and aggregating, in seconds.
    pub duration_seconds: f64,
}

/// The complete census report. Sections disabled in the configuration are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusReport {
    pub metadata: ReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CensusSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<PopulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn penguin(species: Option<&str>, island: Option<&str>, year: Option<&str>) -> Record {
        [("species", species), ("island", island), ("year", year)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_record_field_treats_empty_as_missing() {
        let record = penguin(Some("Adelie"), Some(""), None);
        assert_eq!(record.field("species"), Some("Adelie"));
        assert_eq!(record.field("island"), None);
        assert_eq!(record.field("year"), None);
        assert_eq!(record.field("sex"), None);
    }

    #[test]
    fn test_record_insert_none_removes_field() {
        let mut record = penguin(Some("Adelie"), Some("Dream"), Some("2008"));
        record.insert("island", None::<String>);
        assert_eq!(record.field("island"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_census_summary() {
        let records = vec![
            penguin(Some("Adelie"), Some("Torgersen"), Some("2007")),
            penguin(Some("Gentoo"), Some("Biscoe"), Some("2008")),
            penguin(None, Some("Biscoe"), Some("2008")),
            penguin(Some("Chinstrap"), Some(""), Some("2009")),
            penguin(Some("Adelie"), Some("Dream"), None),
        ];

        let summary = CensusSummary::from_records(&records, &FieldNames::default());

        assert_eq!(summary.total_records, 5);
        assert_eq!(summary.population_records, 3);
        assert_eq!(summary.population_skipped, 2);
        assert_eq!(summary.distribution_records, 2);
        assert_eq!(summary.distribution_skipped, 3);
        assert_eq!(summary.island_counts.get("Biscoe"), Some(&2));
        assert_eq!(summary.island_counts.get("Torgersen"), Some(&1));
        assert!(!summary.island_counts.contains_key("Dream"));
        assert_eq!(summary.species.len(), 2);
        assert!(summary.years.contains("2008"));
        assert!(!summary.years.contains("2009"));
    }

    #[test]
    fn test_field_names_default() {
        let fields = FieldNames::default();
        assert_eq!(fields.all(), ["species", "island", "year"]);
    }
}
