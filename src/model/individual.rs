//! Individual identifiers and canonical unordered pairs.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque sample identifier (e.g. `"I0001"` in the AADR).
///
/// Backed by `Arc<str>` so the segment index, annotation table and
/// per-query results can share one allocation per individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndividualId(Arc<str>);

impl IndividualId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IndividualId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IndividualId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IndividualId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for IndividualId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

/// Unordered pair of individuals, stored with the smaller id first.
///
/// Relatedness is symmetric, so `(a, b)` and `(b, a)` must land on the
/// same key when segments are grouped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: IndividualId,
    high: IndividualId,
}

impl PairKey {
    pub fn new(a: IndividualId, b: IndividualId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The member of the pair that is not `from`, or `None` if `from`
    /// is not part of the pair.
    pub fn other(&self, from: &str) -> Option<&IndividualId> {
        if self.low.as_str() == from {
            Some(&self.high)
        } else if self.high.as_str() == from {
            Some(&self.low)
        } else {
            None
        }
    }

    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_orientation_free() {
        let ab = PairKey::new("A".into(), "B".into());
        let ba = PairKey::new("B".into(), "A".into());
        assert_eq!(ab, ba);
        assert_eq!(ab.other("A").map(IndividualId::as_str), Some("B"));
    }

    #[test]
    fn test_pair_key_other() {
        let key = PairKey::new("X".into(), "Y".into());
        assert_eq!(key.other("X").map(IndividualId::as_str), Some("Y"));
        assert_eq!(key.other("Y").map(IndividualId::as_str), Some("X"));
        assert!(key.other("Z").is_none());
    }

    #[test]
    fn test_self_pair() {
        assert!(PairKey::new("A".into(), "A".into()).is_self_pair());
        assert!(!PairKey::new("A".into(), "B".into()).is_self_pair());
    }
}
