//! Insertion-ordered counting and record validation.

use std::collections::HashMap;

use crate::models::Record;

/// Counter that remembers the order in which keys were first seen.
///
/// `max` walks keys in that order and only moves on a strictly greater
/// count, so the earliest key wins a tie.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to `key`, inserting it with a count of zero first if needed.
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> usize {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Key with the highest count; first inserted wins on ties.
    pub fn max(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;

        for (key, count) in &self.entries {
            if best.map_or(true, |(_, top)| *count > top) {
                best = Some((key.as_str(), *count));
            }
        }

        best
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Keys and counts in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Values of every named field, or `None` if any is absent or empty.
pub fn required_fields<'r, const N: usize>(
    record: &'r Record,
    names: [&str; N],
) -> Option<[&'r str; N]> {
    let mut values = [""; N];

    for (slot, name) in values.iter_mut().zip(names) {
        *slot = record.field(name)?;
    }

    Some(values)
}
