//! Species distribution across islands, per year.

use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::tally::{required_fields, Tally};
use crate::models::{DistributionResult, FieldNames, Record};

/// Percentage of each species' yearly records found on each island.
///
/// Returns `year -> species -> island -> percentage`, rounded to two
/// decimals. Only combinations that were observed appear. Records missing
/// any of species, island or year are skipped, so an input with no valid
/// records yields an empty map.
pub fn species_island_distribution(records: &[Record], fields: &FieldNames) -> DistributionResult {
    // year -> species -> island counts; a species' yearly total is its tally total
    let mut counts: BTreeMap<String, BTreeMap<String, Tally>> = BTreeMap::new();

    for (row, record) in records.iter().enumerate() {
        let Some([species, island, year]) = required_fields(record, fields.all()) else {
            trace!(row, "skipping record without species, island or year");
            continue;
        };

        counts
            .entry(year.to_string())
            .or_default()
            .entry(species.to_string())
            .or_default()
            .increment(island);
    }

    debug!(years = counts.len(), "computed species distribution");

    counts
        .into_iter()
        .map(|(year, by_species)| {
            let shares = by_species
                .into_iter()
                .map(|(species, islands)| {
                    let total = islands.total();
                    let percentages = islands
                        .iter()
                        .map(|(island, count)| (island.to_string(), percentage(count, total)))
                        .collect();
                    (species, percentages)
                })
                .collect();
            (year, shares)
        })
        .collect()
}

/// `count / total` as a percentage rounded to two decimals, ties to even.
fn percentage(count: usize, total: usize) -> f64 {
    let raw = (count as f64 / total as f64) * 100.0;
    (raw * 100.0).round_ties_even() / 100.0
}
