use std::collections::HashSet;

use serde::Deserialize;

use crate::constants::DEFAULT_RARITY;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RarityEntry {
    pub nft_ids: Vec<u64>,
    pub rarity: f64,
}

/// Ordered rarity entries. When an id is listed more than once the first entry wins.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct RarityTable(Vec<RarityEntry>);

impl RarityTable {
    #[cfg(test)]
    pub fn new(entries: Vec<RarityEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[RarityEntry] {
        &self.0
    }

    pub fn rarity_of(&self, token_id: u64) -> f64 {
        self.0
            .iter()
            .find(|entry| entry.nft_ids.contains(&token_id))
            .map_or(DEFAULT_RARITY, |entry| entry.rarity)
    }

    /// Ids listed by more than one entry, in the order their second listing is met.
    pub fn overlapping_ids(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut overlapping = vec![];

        for entry in &self.0 {
            // an id repeated inside one entry is not an overlap
            let mut entry_ids = HashSet::new();
            for id in &entry.nft_ids {
                if !entry_ids.insert(*id) {
                    continue;
                }
                if seen.contains(id) && reported.insert(*id) {
                    overlapping.push(*id);
                }
            }
            seen.extend(entry_ids);
        }

        overlapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(nft_ids: &[u64], rarity: f64) -> RarityEntry {
        RarityEntry {
            nft_ids: nft_ids.to_vec(),
            rarity,
        }
    }

    #[test]
    fn unlisted_id_defaults_to_one() {
        let table = RarityTable::new(vec![entry(&[1, 2], 5.0)]);

        assert_eq!(table.rarity_of(0), 1.0);
        assert_eq!(table.rarity_of(3), 1.0);
        assert_eq!(RarityTable::default().rarity_of(42), 1.0);
    }

    #[test]
    fn listed_id_takes_entry_weight() {
        let table = RarityTable::new(vec![entry(&[1, 2], 5.0), entry(&[7], 2.5)]);

        assert_eq!(table.rarity_of(1), 5.0);
        assert_eq!(table.rarity_of(2), 5.0);
        assert_eq!(table.rarity_of(7), 2.5);
    }

    #[test]
    fn first_matching_entry_wins() {
        let table = RarityTable::new(vec![entry(&[4, 5], 3.0), entry(&[5, 6], 10.0)]);

        assert_eq!(table.rarity_of(5), 3.0);
        assert_eq!(table.rarity_of(6), 10.0);
    }

    #[test]
    fn reports_overlapping_ids_once() {
        let table = RarityTable::new(vec![
            entry(&[1, 2, 2], 3.0),
            entry(&[2, 3], 4.0),
            entry(&[3, 2], 5.0),
        ]);

        assert_eq!(table.overlapping_ids(), vec![2, 3]);
    }
}
