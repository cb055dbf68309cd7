//! Attach annotations to aggregated partners.

use tracing::warn;

use crate::model::MatchResult;
use crate::storage::AnnotationTable;
use super::PartnerTotals;

/// Inner join of partner totals with the annotation table.
///
/// Rows come out strongest first (ties by id). A partner with no
/// annotation is dropped with a warning: after reconciliation that can
/// only mean the tables were built inconsistently.
pub fn join(totals: &PartnerTotals, annotations: &AnnotationTable) -> Vec<MatchResult> {
    let mut missing = 0usize;
    let mut rows: Vec<MatchResult> = totals
        .iter()
        .filter_map(|(id, &total)| match annotations.get(id.as_str()) {
            Some(anno) => Some(MatchResult::from_annotation(anno, total)),
            None => {
                missing += 1;
                None
            }
        })
        .collect();

    if missing > 0 {
        warn!(missing, "partners without an annotation row were dropped; tables are out of sync");
    }

    rows.sort_by(|a, b| {
        b.summed_length
            .total_cmp(&a.summed_length)
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}
