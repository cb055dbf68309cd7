//! In-memory segment table with a per-individual row index.
//!
//! Rows are stored once in load order. The adjacency index maps each
//! individual to the rows it appears in (either slot), so "every segment
//! touching X" costs O(degree of X) rather than a table scan.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::model::{IndividualId, SegmentRecord};

/// Row positions for one individual. Most samples share few segments.
type RowList = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    rows: Vec<SegmentRecord>,
    /// individual → indices into `rows`
    adjacency: HashMap<IndividualId, RowList>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = SegmentRecord>) -> Self {
        let mut store = Self::new();
        for rec in records {
            store.insert(rec);
        }
        store
    }

    pub fn insert(&mut self, rec: SegmentRecord) {
        let row = self.rows.len();
        self.adjacency.entry(rec.participant_a.clone()).or_default().push(row);
        if rec.participant_a != rec.participant_b {
            self.adjacency.entry(rec.participant_b.clone()).or_default().push(row);
        }
        self.rows.push(rec);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> &[SegmentRecord] {
        &self.rows
    }

    /// Every individual named in either slot of any row.
    pub fn individuals(&self) -> impl Iterator<Item = &IndividualId> {
        self.adjacency.keys()
    }

    pub fn individual_set(&self) -> HashSet<IndividualId> {
        self.individuals().cloned().collect()
    }

    pub fn individual_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains_individual(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Rows where `id` occupies either slot. Unknown ids yield nothing.
    pub fn segments_touching<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a SegmentRecord> + use<'a> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(move |rows| rows.iter().map(move |&r| &self.rows[r]))
    }

    /// A new store holding only the rows accepted by `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&SegmentRecord) -> bool) -> Self {
        Self::from_records(self.rows.iter().filter(|rec| keep(*rec)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SegmentStore {
        SegmentStore::from_records([
            SegmentRecord::new("A", "B", 0.10),
            SegmentRecord::new("B", "A", 0.05),
            SegmentRecord::new("B", "C", 0.02),
            SegmentRecord::new("D", "D", 0.01),
        ])
    }

    #[test]
    fn test_index_both_slots() {
        let store = sample();
        assert_eq!(store.len(), 4);
        assert_eq!(store.individual_count(), 4);
        assert_eq!(store.segments_touching("A").count(), 2);
        assert_eq!(store.segments_touching("B").count(), 3);
        assert_eq!(store.segments_touching("C").count(), 1);
    }

    #[test]
    fn test_self_pair_indexed_once() {
        let store = sample();
        assert_eq!(store.segments_touching("D").count(), 1);
    }

    #[test]
    fn test_unknown_individual() {
        let store = sample();
        assert_eq!(store.segments_touching("Z").count(), 0);
        assert!(!store.contains_individual("Z"));
    }

    #[test]
    fn test_touching_rows_name_the_partner() {
        let store = sample();
        let mut partners: Vec<&str> = store
            .segments_touching("B")
            .filter_map(|rec| rec.other("B"))
            .map(IndividualId::as_str)
            .collect();
        partners.sort();
        assert_eq!(partners, vec!["A", "A", "C"]);
    }

    #[test]
    fn test_filtered_rebuilds_index() {
        let store = sample().filtered(|rec| rec.participant_b.as_str() != "C");
        assert_eq!(store.len(), 3);
        assert!(!store.contains_individual("C"));
        assert_eq!(store.segments_touching("B").count(), 2);
    }
}
