//! Property tests over randomly generated segment and annotation tables.

use ibd_map::model::floor_to;
use ibd_map::query::{aggregate, filter, join};
use ibd_map::reconcile::reconcile;
use ibd_map::{AnnotationRecord, AnnotationTable, BinEdges, LengthBounds, SegmentRecord, SegmentStore};
use proptest::prelude::*;

const IDS: [&str; 8] = ["I0", "I1", "I2", "I3", "I4", "I5", "I6", "I7"];
const WIDTH: i64 = 1000;

fn segment_rows() -> impl Strategy<Value = Vec<(usize, usize, u32, bool)>> {
    prop::collection::vec((0..IDS.len(), 0..IDS.len(), 0u32..500, any::<bool>()), 0..40)
}

fn build_store(rows: &[(usize, usize, u32, bool)], flip: bool) -> SegmentStore {
    SegmentStore::from_records(rows.iter().map(|&(a, b, cm, swap)| {
        let (a, b) = if flip && swap { (b, a) } else { (a, b) };
        SegmentRecord::new(IDS[a], IDS[b], f64::from(cm) / 100.0)
    }))
}

/// Annotates a subset of `IDS` (plus one id never seen in segments).
fn build_annotations(annotated: &[bool], years: &[i64]) -> AnnotationTable {
    let mut records: Vec<AnnotationRecord> = IDS
        .iter()
        .zip(annotated)
        .zip(years)
        .filter(|((_, keep), _)| **keep)
        .map(|((id, _), year)| AnnotationRecord::new(*id, *year, "Pop", None, None, 1950, WIDTH))
        .collect();
    records.push(AnnotationRecord::new("outsider", 1950, "Pop", None, None, 1950, WIDTH));
    AnnotationTable::from_records(records, WIDTH)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_totals_ignore_row_orientation(rows in segment_rows()) {
        let as_loaded = build_store(&rows, false);
        let flipped = build_store(&rows, true);
        for id in IDS {
            let lhs = aggregate(&as_loaded, id);
            let rhs = aggregate(&flipped, id);
            prop_assert_eq!(lhs.len(), rhs.len());
            for (partner, total) in &lhs {
                let other = rhs.get(partner.as_str()).copied().unwrap_or(f64::NAN);
                prop_assert!(close(*total, other), "{id}/{partner}: {total} vs {other}");
            }
        }
    }

    #[test]
    fn prop_totals_match_brute_force_sum(rows in segment_rows()) {
        let store = build_store(&rows, true);
        for (x, id_x) in IDS.iter().enumerate() {
            let totals = aggregate(&store, id_x);
            for (y, id_y) in IDS.iter().enumerate() {
                let pair: Vec<f64> = rows
                    .iter()
                    .filter(|&&(a, b, _, _)| x != y && ((a, b) == (x, y) || (a, b) == (y, x)))
                    .map(|&(_, _, cm, _)| f64::from(cm) / 100.0)
                    .collect();
                match totals.get(*id_y) {
                    Some(total) => {
                        prop_assert!(!pair.is_empty(), "{id_x}/{id_y} reported without any segment");
                        let expected: f64 = pair.iter().sum();
                        prop_assert!(close(*total, expected), "{id_x}/{id_y}: {total} vs {expected}");
                    }
                    None => prop_assert!(pair.is_empty(), "{id_x}/{id_y} missing"),
                }
            }
        }
    }

    #[test]
    fn prop_totals_are_symmetric(rows in segment_rows()) {
        let store = build_store(&rows, false);
        for a in IDS {
            let from_a = aggregate(&store, a);
            prop_assert!(!from_a.contains_key(a));
            for (b, total) in &from_a {
                let back = aggregate(&store, b.as_str());
                let reverse = back.get(a).copied().unwrap_or(f64::NAN);
                prop_assert!(close(*total, reverse));
            }
        }
    }

    #[test]
    fn prop_every_date_falls_in_exactly_one_bucket(
        dates in prop::collection::vec(-20_000i64..20_000, 1..50),
    ) {
        let edges = BinEdges::from_dates(dates.iter().copied(), WIDTH).unwrap();
        for date in &dates {
            let bucket = floor_to(*date, WIDTH);
            prop_assert!(bucket <= *date && *date < bucket + WIDTH);
            prop_assert_eq!(edges.bucket_of(*date), Some(bucket));
            prop_assert_eq!(edges.iter().filter(|b| *b <= *date && *date < b + WIDTH).count(), 1);
        }
    }

    #[test]
    fn prop_filter_keeps_an_ordered_subset_inside_bounds(
        rows in segment_rows(),
        years in prop::collection::vec(-3000i64..9000, IDS.len()),
        lower in 0u32..300,
        span in 0u32..300,
        pick in 0usize..IDS.len(),
    ) {
        let store = build_store(&rows, true);
        let annotations = build_annotations(&[true; 8], &years);
        let joined = join(&aggregate(&store, IDS[pick]), &annotations);
        let bounds = LengthBounds::new(f64::from(lower) / 100.0, f64::from(lower + span) / 100.0).unwrap();

        for bucket in joined.iter().map(|m| m.age_bucket) {
            let kept = filter(&joined, bucket, bounds);
            let mut cursor = joined.iter();
            for m in &kept {
                prop_assert_eq!(m.age_bucket, bucket);
                prop_assert!(bounds.contains(m.summed_length));
                prop_assert!(cursor.any(|j| j == m), "not an ordered subsequence");
            }
            let expected = joined
                .iter()
                .filter(|m| m.age_bucket == bucket && bounds.contains(m.summed_length))
                .count();
            prop_assert_eq!(kept.len(), expected);
        }
    }

    #[test]
    fn prop_reconcile_is_closed_and_idempotent(
        rows in segment_rows(),
        annotated in prop::collection::vec(any::<bool>(), IDS.len()),
        years in prop::collection::vec(0i64..8000, IDS.len()),
    ) {
        let once = reconcile(&build_store(&rows, false), &build_annotations(&annotated, &years));

        for rec in once.segments.records() {
            prop_assert!(once.annotations.contains(rec.participant_a.as_str()));
            prop_assert!(once.annotations.contains(rec.participant_b.as_str()));
        }
        for id in once.annotations.ids() {
            prop_assert!(once.segments.contains_individual(id.as_str()));
        }

        let twice = reconcile(&once.segments, &once.annotations);
        prop_assert!(twice.report.is_clean());
        prop_assert_eq!(twice.segments.len(), once.segments.len());
        prop_assert_eq!(twice.annotations.len(), once.annotations.len());
    }
}
