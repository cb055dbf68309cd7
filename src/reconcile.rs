//! Reciprocal filtering of the segment and annotation tables.
//!
//! Narrows both tables to one shared identifier universe:
//!
//! 1. intersect the segment-side and annotation-side id sets;
//! 2. keep segments whose *both* endpoints are in the intersection;
//! 3. keep annotations whose id is still referenced by a kept segment.
//!
//! Step 3 matters when an individual's only partners were unannotated:
//! without it the annotation side would keep an id that no segment
//! references, and a second pass would remove it.

use hashbrown::HashSet;
use serde::Serialize;
use tracing::{info, warn};

use crate::model::IndividualId;
use crate::storage::{AnnotationTable, SegmentStore};

/// Diagnostics from one reconciliation pass. Never fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Segment-side ids with no annotation row.
    pub discarded_segment_ids: usize,
    /// Annotation rows dropped (not in the segment file, or left without partners).
    pub discarded_annotations: usize,
    /// Segment rows dropped because an endpoint was discarded.
    pub discarded_segments: usize,
    /// Size of the final shared identifier universe.
    pub retained_individuals: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.discarded_segment_ids == 0 && self.discarded_annotations == 0 && self.discarded_segments == 0
    }
}

/// Both tables after reconciliation, plus what was thrown away.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub segments: SegmentStore,
    pub annotations: AnnotationTable,
    pub report: ReconcileReport,
}

pub fn reconcile(segments: &SegmentStore, annotations: &AnnotationTable) -> Reconciled {
    let segment_ids = segments.individual_set();
    let shared: HashSet<&IndividualId> = segment_ids
        .iter()
        .filter(|id| annotations.contains(id.as_str()))
        .collect();
    let discarded_segment_ids = segment_ids.len() - shared.len();

    let kept_segments = segments.filtered(|rec| {
        shared.contains(&rec.participant_a) && shared.contains(&rec.participant_b)
    });
    let kept_annotations = annotations.filtered(|rec| kept_segments.contains_individual(rec.id.as_str()));

    let report = ReconcileReport {
        discarded_segment_ids,
        discarded_annotations: annotations.len() - kept_annotations.len(),
        discarded_segments: segments.len() - kept_segments.len(),
        retained_individuals: kept_annotations.len(),
    };

    if discarded_segment_ids > 0 {
        warn!(
            discarded = discarded_segment_ids,
            "segment ids not in annotation file; discarding them"
        );
    }
    info!(
        individuals = report.retained_individuals,
        segments = kept_segments.len(),
        dropped_segments = report.discarded_segments,
        dropped_annotations = report.discarded_annotations,
        "reconciled segment and annotation tables"
    );

    Reconciled {
        segments: kept_segments,
        annotations: kept_annotations,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationRecord, SegmentRecord};
    use pretty_assertions::assert_eq;

    fn anno(ids: &[&str]) -> AnnotationTable {
        AnnotationTable::from_records(
            ids.iter().map(|id| AnnotationRecord::new(*id, 3000, "P", None, None, 1950, 1000)),
            1000,
        )
    }

    fn sorted(ids: impl Iterator<Item = IndividualId>) -> Vec<String> {
        let mut v: Vec<String> = ids.map(|id| id.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_unannotated_segment_id_removed_from_both() {
        let segments = SegmentStore::from_records([
            SegmentRecord::new("A", "B", 0.1),
            SegmentRecord::new("A", "X", 0.2),
            SegmentRecord::new("Y", "B", 0.3),
        ]);
        let annotations = anno(&["A", "B", "C"]);

        let out = reconcile(&segments, &annotations);

        assert_eq!(out.report.discarded_segment_ids, 2);
        assert_eq!(out.report.discarded_segments, 2);
        assert_eq!(out.report.discarded_annotations, 1);
        assert_eq!(out.report.retained_individuals, 2);
        assert_eq!(sorted(out.segments.individuals().cloned()), vec!["A", "B"]);
        assert_eq!(sorted(out.annotations.ids().cloned()), vec!["A", "B"]);
    }

    #[test]
    fn test_orphaned_partner_dropped() {
        // C is annotated but its only partner is not.
        let segments = SegmentStore::from_records([
            SegmentRecord::new("A", "B", 0.1),
            SegmentRecord::new("C", "X", 0.2),
        ]);
        let out = reconcile(&segments, &anno(&["A", "B", "C"]));
        assert!(!out.annotations.contains("C"));
        assert!(!out.segments.contains_individual("C"));
        assert_eq!(out.report.discarded_segment_ids, 1);
    }

    #[test]
    fn test_idempotent() {
        let segments = SegmentStore::from_records([
            SegmentRecord::new("A", "B", 0.1),
            SegmentRecord::new("B", "Z", 0.1),
        ]);
        let first = reconcile(&segments, &anno(&["A", "B"]));
        let second = reconcile(&first.segments, &first.annotations);
        assert!(second.report.is_clean());
        assert_eq!(second.segments.len(), first.segments.len());
        assert_eq!(second.annotations.len(), first.annotations.len());
    }
}
