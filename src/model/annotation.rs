//! Per-sample annotation: when and where an individual lived.

use serde::{Deserialize, Serialize};
use super::{IndividualId, bins};

/// One row of the annotation table, with its derived temporal fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: IndividualId,
    /// Year as written in the source file.
    pub raw_year: i64,
    /// `raw_year` shifted to the "years before year zero" scale.
    pub date: i64,
    pub population: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub age_label: String,
    pub age_bucket: i64,
}

impl AnnotationRecord {
    /// Build a record, deriving `date`, `age_label` and `age_bucket`.
    ///
    /// # Panics
    ///
    /// If `bucket_width` is zero. Loaders validate it before building records.
    pub fn new(
        id: impl Into<IndividualId>,
        raw_year: i64,
        population: impl Into<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        epoch_offset: i64,
        bucket_width: i64,
    ) -> Self {
        let date = raw_year.saturating_sub(epoch_offset);
        Self {
            id: id.into(),
            raw_year,
            date,
            population: population.into(),
            latitude,
            longitude,
            age_label: bins::age_label(date),
            age_bucket: bins::floor_to(date, bucket_width),
        }
    }
}
