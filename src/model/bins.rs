//! Temporal buckets.
//!
//! Dates are bucketed into half-open intervals `[edge, edge + width)`.
//! The bucket of a date is its floor to a multiple of `width`, so the
//! assignment is total and needs no lookup table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default bucket width in years.
pub const DEFAULT_BUCKET_WIDTH: i64 = 1000;

/// Largest accepted magnitude for a raw year or epoch offset.
pub const MAX_ABS_YEAR: i64 = 1_000_000;

/// Round `value` down to a multiple of `width` (toward −∞).
pub fn floor_to(value: i64, width: i64) -> i64 {
    value.div_euclid(width) * width
}

/// Human label for a date on the "years before year zero" scale.
///
/// Non-positive dates are in the common era: `0` → `"0 CE"`,
/// `-500` → `"500 CE"`, `1000` → `"1000 BCE"`.
pub fn age_label(date: i64) -> String {
    if date <= 0 {
        format!("{} CE", date.unsigned_abs())
    } else {
        format!("{date} BCE")
    }
}

// ============================================================================
// BinEdges
// ============================================================================

/// The bucket starts covering a set of dates.
///
/// Runs from `floor_to(min)` through `floor_to(max)` inclusive. When the
/// maximum date is itself a multiple of `width` the bucket starting there
/// is kept, so every observed date has a bucket. A single-point
/// distribution yields one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinEdges {
    first: i64,
    last: i64,
    width: i64,
}

impl BinEdges {
    /// Edges covering the given dates, or `None` for an empty input or a
    /// non-positive `width`.
    pub fn from_dates(dates: impl IntoIterator<Item = i64>, width: i64) -> Option<Self> {
        if width <= 0 {
            return None;
        }
        let mut iter = dates.into_iter();
        let first_date = iter.next()?;
        let (min, max) = iter.fold((first_date, first_date), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self {
            first: floor_to(min, width),
            last: floor_to(max, width),
            width,
        })
    }

    /// Lowest bucket start.
    pub fn min_edge(&self) -> i64 {
        self.first
    }

    /// Highest bucket start.
    pub fn max_edge(&self) -> i64 {
        self.last
    }

    /// Exclusive upper bound of the covered range.
    pub fn upper_bound(&self) -> i64 {
        self.last + self.width
    }

    pub fn len(&self) -> usize {
        (self.last.abs_diff(self.first) / self.width.unsigned_abs()) as usize + 1
    }

    /// Always `false`: edges exist only for a non-empty set of dates.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: i64) -> bool {
        date >= self.first && date < self.upper_bound()
    }

    /// Bucket start for `date`, or `None` if it falls outside the edges.
    pub fn bucket_of(&self, date: i64) -> Option<i64> {
        self.contains(date).then(|| floor_to(date, self.width))
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len() as i64).map(move |i| self.first + i * self.width)
    }
}

// ============================================================================
// BinRange
// ============================================================================

/// Buckets actually present in one individual's matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinRange {
    pub min: i64,
    pub max: i64,
    /// Present bucket → CE/BCE label, ascending.
    pub labels: BTreeMap<i64, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_rounds_toward_negative_infinity() {
        assert_eq!(floor_to(1500, 1000), 1000);
        assert_eq!(floor_to(-1500, 1000), -2000);
        assert_eq!(floor_to(-1000, 1000), -1000);
        assert_eq!(floor_to(0, 1000), 0);
    }

    #[test]
    fn test_upper_bound_is_ceiling_when_max_off_edge() {
        let edges = BinEdges::from_dates([120, 2500], 1000).unwrap();
        assert_eq!(edges.upper_bound(), 3000);
    }

    #[test]
    fn test_age_label_sign_rule() {
        assert_eq!(age_label(0), "0 CE");
        assert_eq!(age_label(-74), "74 CE");
        assert_eq!(age_label(1000), "1000 BCE");
        assert_eq!(age_label(1), "1 BCE");
    }

    #[test]
    fn test_edges_cover_range() {
        let edges = BinEdges::from_dates([-1500, 230, 4120], 1000).unwrap();
        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![-2000, -1000, 0, 1000, 2000, 3000, 4000]);
        assert_eq!(edges.bucket_of(4120), Some(4000));
        assert_eq!(edges.bucket_of(-1500), Some(-2000));
        assert_eq!(edges.bucket_of(5000), None);
    }

    #[test]
    fn test_max_on_edge_keeps_last_bucket() {
        let edges = BinEdges::from_dates([100, 3000], 1000).unwrap();
        assert_eq!(edges.max_edge(), 3000);
        assert_eq!(edges.bucket_of(3000), Some(3000));
    }

    #[test]
    fn test_single_point_is_one_bucket() {
        let edges = BinEdges::from_dates([2000, 2000], 1000).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges.bucket_of(2000), Some(2000));
    }

    #[test]
    fn test_empty_dates() {
        assert!(BinEdges::from_dates(Vec::<i64>::new(), 1000).is_none());
    }

    #[test]
    fn test_zero_width_has_no_edges() {
        assert!(BinEdges::from_dates([10, 20], 0).is_none());
    }

    #[test]
    fn test_len_over_extreme_span() {
        let edges = BinEdges::from_dates([i64::MIN / 2, i64::MAX / 2], i64::MAX / 4).unwrap();
        assert!(edges.len() >= 4);
    }
}
