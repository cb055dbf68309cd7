//! In-memory annotation table keyed by individual.

use hashbrown::HashMap;

use crate::model::{AnnotationRecord, BinEdges, IndividualId, DEFAULT_BUCKET_WIDTH};

#[derive(Debug, Clone)]
pub struct AnnotationTable {
    records: Vec<AnnotationRecord>,
    by_id: HashMap<IndividualId, usize>,
    bucket_width: i64,
}

impl Default for AnnotationTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_WIDTH)
    }
}

impl AnnotationTable {
    pub fn new(bucket_width: i64) -> Self {
        Self {
            records: Vec::new(),
            by_id: HashMap::new(),
            bucket_width,
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = AnnotationRecord>, bucket_width: i64) -> Self {
        let mut table = Self::new(bucket_width);
        for rec in records {
            table.insert(rec);
        }
        table
    }

    /// Insert a record. Returns `false` (and keeps the existing row) if
    /// the id is already present.
    pub fn insert(&mut self, rec: AnnotationRecord) -> bool {
        if self.by_id.contains_key(&rec.id) {
            return false;
        }
        self.by_id.insert(rec.id.clone(), self.records.len());
        self.records.push(rec);
        true
    }

    pub fn get(&self, id: &str) -> Option<&AnnotationRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = &IndividualId> {
        self.records.iter().map(|r| &r.id)
    }

    /// Bucket edges over every date in the table; `None` when empty.
    pub fn bin_edges(&self) -> Option<BinEdges> {
        BinEdges::from_dates(self.records.iter().map(|r| r.date), self.bucket_width)
    }

    /// A new table holding only the rows accepted by `keep`, in order.
    pub fn filtered(&self, mut keep: impl FnMut(&AnnotationRecord) -> bool) -> Self {
        Self::from_records(
            self.records.iter().filter(|rec| keep(*rec)).cloned(),
            self.bucket_width,
        )
    }
}
