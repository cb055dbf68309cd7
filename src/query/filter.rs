//! Bucket and strength filtering of a joined result.

use serde::{Deserialize, Serialize};

use crate::model::MatchResult;
use crate::{Error, Result};

/// Inclusive `[lower, upper]` interval on summed length (Morgans).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for LengthBounds {
    /// 0 to 100 Morgans, wide enough to admit every pair.
    fn default() -> Self {
        Self { lower: 0.0, upper: 100.0 }
    }
}

impl LengthBounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() {
            return Err(Error::Validation("length bounds must be numbers, got NaN".into()));
        }
        Ok(Self { lower, upper })
    }

    /// Parse user-supplied bound strings. Rejects anything that is not a
    /// number before it can reach the filter.
    pub fn parse(lower: &str, upper: &str) -> Result<Self> {
        Self::new(parse_bound("lower", lower)?, parse_bound("upper", upper)?)
    }

    pub fn contains(&self, length: f64) -> bool {
        self.lower <= length && length <= self.upper
    }
}

fn parse_bound(which: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Validation(format!("{which} bound is not a number: '{raw}'")))
}

/// Rows in `bucket` whose summed length lies within `bounds`, in input order.
pub fn filter(joined: &[MatchResult], bucket: i64, bounds: LengthBounds) -> Vec<MatchResult> {
    joined
        .iter()
        .filter(|m| m.age_bucket == bucket && bounds.contains(m.summed_length))
        .cloned()
        .collect()
}
