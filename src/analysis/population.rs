//! Most populous island, overall and per year.

use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::tally::{required_fields, Tally};
use crate::error::{CensusError, CensusResult};
use crate::models::{FieldNames, PopulationResult, Record};

/// Find the island with the most records overall and in each year.
///
/// Records without an island or a year are skipped. Ties go to the island
/// that was counted first. Fails with [`CensusError::EmptyDataset`] when no
/// record has both fields.
pub fn most_populous(records: &[Record], fields: &FieldNames) -> CensusResult<PopulationResult> {
    let mut island_counts = Tally::new();
    let mut yearly_counts: BTreeMap<String, Tally> = BTreeMap::new();

    for (row, record) in records.iter().enumerate() {
        let Some([island, year]) =
            required_fields(record, [fields.island.as_str(), fields.year.as_str()])
        else {
            trace!(row, "skipping record without island or year");
            continue;
        };

        island_counts.increment(island);
        yearly_counts
            .entry(year.to_string())
            .or_default()
            .increment(island);
    }

    let (overall, count) = island_counts.max().ok_or(CensusError::EmptyDataset)?;
    debug!(island = overall, count, "most populous island overall");

    let per_year = yearly_counts
        .iter()
        .filter_map(|(year, counts)| {
            counts
                .max()
                .map(|(island, _)| (year.clone(), island.to_string()))
        })
        .collect();

    Ok(PopulationResult {
        overall: overall.to_string(),
        per_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn penguin(species: &str, island: Option<&str>, year: &str) -> Record {
        [
            ("species", Some(species)),
            ("island", island),
            ("year", Some(year)),
        ]
        .into_iter()
        .collect()
    }

    fn sample_penguins() -> Vec<Record> {
        vec![
            penguin("Adelie", Some("Torgersen"), "2007"),
            penguin("Adelie", Some("Torgersen"), "2007"),
            penguin("Gentoo", Some("Biscoe"), "2008"),
            penguin("Chinstrap", Some("Dream"), "2008"),
            penguin("Chinstrap", Some("Dream"), "2008"),
            penguin("Adelie", Some("Torgersen"), "2008"),
        ]
    }

    #[test]
    fn test_most_populous_normal() {
        let result = most_populous(&sample_penguins(), &FieldNames::default()).unwrap();

        assert_eq!(result.overall, "Torgersen");
        assert_eq!(result.per_year.get("2007").map(String::as_str), Some("Torgersen"));
        assert_eq!(result.per_year.get("2008").map(String::as_str), Some("Dream"));
        assert_eq!(result.per_year.len(), 2);
    }

    #[test]
    fn test_most_populous_single_island() {
        let records = vec![
            penguin("Adelie", Some("Biscoe"), "2007"),
            penguin("Adelie", Some("Biscoe"), "2008"),
        ];

        let result = most_populous(&records, &FieldNames::default()).unwrap();

        assert_eq!(result.overall, "Biscoe");
        assert_eq!(result.per_year.len(), 2);
        assert!(result.per_year.values().all(|island| island == "Biscoe"));
    }

    #[test]
    fn test_most_populous_tie() {
        let records = vec![
            penguin("Adelie", Some("Dream"), "2007"),
            penguin("Adelie", Some("Biscoe"), "2007"),
        ];

        let result = most_populous(&records, &FieldNames::default()).unwrap();

        assert!(["Dream", "Biscoe"].contains(&result.overall.as_str()));
        assert!(["Dream", "Biscoe"].contains(&result.per_year["2007"].as_str()));
        // First counted island wins.
        assert_eq!(result.overall, "Dream");
    }

    #[test]
    fn test_most_populous_with_missing_data() {
        let records: Vec<Record> = vec![
            penguin("Adelie", Some("Torgersen"), "2008"),
            penguin("Adelie", Some(""), "2008"),
            penguin("Gentoo", None, "2008"),
            penguin("Chinstrap", Some("Dream"), ""),
        ];

        let result = most_populous(&records, &FieldNames::default()).unwrap();

        assert_eq!(result.overall, "Torgersen");
        assert_eq!(result.per_year["2008"], "Torgersen");
        assert_eq!(result.per_year.len(), 1);
    }

    #[test]
    fn test_whitespace_island_is_present() {
        let records = vec![
            penguin("Adelie", Some(" "), "2008"),
            penguin("Adelie", Some(" "), "2008"),
            penguin("Adelie", Some("Dream"), "2008"),
        ];

        let result = most_populous(&records, &FieldNames::default()).unwrap();
        assert_eq!(result.overall, " ");
    }

    #[test]
    fn test_most_populous_empty_dataset() {
        let records = vec![
            penguin("Adelie", None, "2007"),
            penguin("Gentoo", Some(""), "2008"),
        ];

        let err = most_populous(&records, &FieldNames::default()).unwrap_err();
        assert!(matches!(err, CensusError::EmptyDataset));

        let err = most_populous(&[], &FieldNames::default()).unwrap_err();
        assert!(matches!(err, CensusError::EmptyDataset));
    }

    #[test]
    fn test_overall_island_has_maximal_count() {
        let records = sample_penguins();
        let result = most_populous(&records, &FieldNames::default()).unwrap();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &records {
            *counts.entry(record.field("island").unwrap()).or_default() += 1;
        }

        let winner = counts[result.overall.as_str()];
        assert!(counts.values().all(|&count| winner >= count));
    }

    #[test]
    fn test_most_populous_is_idempotent() {
        let records = sample_penguins();
        let first = most_populous(&records, &FieldNames::default()).unwrap();
        let second = most_populous(&records, &FieldNames::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_most_populous_custom_field_names() {
        let fields = FieldNames {
            species: "Species".to_string(),
            island: "Island".to_string(),
            year: "Year".to_string(),
        };
        let records: Vec<Record> = vec![
            [("Island", Some("Dream")), ("Year", Some("2009"))]
                .into_iter()
                .collect(),
            [("island", Some("Biscoe")), ("year", Some("2009"))]
                .into_iter()
                .collect(),
        ];

        let result = most_populous(&records, &fields).unwrap();
        assert_eq!(result.overall, "Dream");
        assert_eq!(result.per_year["2009"], "Dream");
    }
}
