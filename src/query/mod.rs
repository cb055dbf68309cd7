//! # Per-Query Pipeline
//!
//! ```text
//! aggregate ─→ join ─→ resolve (bucket range of this individual)
//!                  └─→ filter  (one bucket, one length interval)
//! ```
//!
//! Every stage is a pure function over the immutable base tables; nothing
//! is cached between queries.

pub mod aggregate;
pub mod join;
pub mod bins;
pub mod filter;

pub use aggregate::{aggregate, PartnerTotals};
pub use join::join;
pub use bins::resolve;
pub use filter::{filter, LengthBounds};

use serde::{Deserialize, Serialize};

use crate::model::{AnnotationRecord, BinRange, IndividualId, MatchResult};
use crate::Result;

/// One user request: who, which bucket, how strong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub individual: IndividualId,
    /// `None` selects the earliest bucket present in the individual's matches.
    pub bucket: Option<i64>,
    pub bounds: LengthBounds,
}

impl Query {
    pub fn new(individual: impl Into<IndividualId>) -> Self {
        Self {
            individual: individual.into(),
            bucket: None,
            bounds: LengthBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: LengthBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Build a query from raw user input, validating the bound strings.
    pub fn parse(
        individual: impl Into<IndividualId>,
        bucket: Option<i64>,
        lower: &str,
        upper: &str,
    ) -> Result<Self> {
        Ok(Self {
            individual: individual.into(),
            bucket,
            bounds: LengthBounds::parse(lower, upper)?,
        })
    }
}

/// Everything the presentation layer needs for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// The selected individual's own annotation (the highlighted marker).
    pub selected: AnnotationRecord,
    /// Bucket the matches were filtered to; `None` if there were no partners.
    pub bucket: Option<i64>,
    /// Buckets present among all partners, before filtering.
    pub bin_range: Option<BinRange>,
    /// Partners before bucket and length filtering.
    pub total_partners: usize,
    pub matches: Vec<MatchResult>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
