//! # Data Model
//!
//! Plain DTOs shared by the loaders, the reconciled tables and the query
//! pipeline. No I/O and no state live here.

pub mod individual;
pub mod segment;
pub mod annotation;
pub mod match_result;
pub mod bins;

pub use individual::{IndividualId, PairKey};
pub use segment::SegmentRecord;
pub use annotation::AnnotationRecord;
pub use match_result::MatchResult;
pub use bins::{BinEdges, BinRange, age_label, floor_to, DEFAULT_BUCKET_WIDTH, MAX_ABS_YEAR};
