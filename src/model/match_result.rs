//! One aggregated partner of a query individual, joined with its annotation.

use serde::{Deserialize, Serialize};
use super::{AnnotationRecord, IndividualId};

/// A row of the per-query result, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: IndividualId,
    /// Total shared IBD with the query individual, in Morgans.
    pub summed_length: f64,
    pub population: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: i64,
    pub age_label: String,
    pub age_bucket: i64,
}

impl MatchResult {
    pub fn from_annotation(annotation: &AnnotationRecord, summed_length: f64) -> Self {
        Self {
            id: annotation.id.clone(),
            summed_length,
            population: annotation.population.clone(),
            latitude: annotation.latitude,
            longitude: annotation.longitude,
            date: annotation.date,
            age_label: annotation.age_label.clone(),
            age_bucket: annotation.age_bucket,
        }
    }
}
