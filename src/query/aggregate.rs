//! Sum shared IBD per partner for one query individual.

use hashbrown::HashMap;

use crate::model::{IndividualId, PairKey};
use crate::storage::SegmentStore;

/// Partner → total shared length (Morgans).
pub type PartnerTotals = HashMap<IndividualId, f64>;

/// Total shared length between `id` and each of its partners.
///
/// Rows are grouped on the canonical [`PairKey`], so `(id, p)` and
/// `(p, id)` segments land in the same total whichever slot the source
/// put them in. Repeated rows for the same pair are all summed. Self
/// pairs are skipped, and an id with no segments yields an empty map.
pub fn aggregate(store: &SegmentStore, id: &str) -> PartnerTotals {
    let mut by_pair: HashMap<PairKey, f64> = HashMap::new();
    for rec in store.segments_touching(id) {
        let key = rec.pair_key();
        if key.is_self_pair() {
            continue;
        }
        *by_pair.entry(key).or_insert(0.0) += rec.length;
    }

    by_pair
        .into_iter()
        .filter_map(|(key, total)| key.other(id).cloned().map(|partner| (partner, total)))
        .collect()
}
