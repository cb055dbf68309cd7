//! A single shared IBD segment between two individuals.

use serde::{Deserialize, Serialize};
use super::{IndividualId, PairKey};

/// One row of the segment table.
///
/// Slot order carries no meaning: the upstream caller may emit a pair as
/// `(a, b)`, `(b, a)` or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub participant_a: IndividualId,
    pub participant_b: IndividualId,
    /// Segment length in Morgans.
    pub length: f64,
}

impl SegmentRecord {
    pub fn new(a: impl Into<IndividualId>, b: impl Into<IndividualId>, length: f64) -> Self {
        Self {
            participant_a: a.into(),
            participant_b: b.into(),
            length,
        }
    }

    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.participant_a.clone(), self.participant_b.clone())
    }

    /// The other end of the segment from the given individual.
    pub fn other(&self, from: &str) -> Option<&IndividualId> {
        if from == self.participant_a.as_str() { Some(&self.participant_b) }
        else if from == self.participant_b.as_str() { Some(&self.participant_a) }
        else { None }
    }
}
