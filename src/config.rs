//! Loader and query configuration.
//!
//! Every field has a default matching the AADR annotation layout and the
//! ancIBD segment output, so an empty (or absent) TOML file is valid:
//!
//! ```toml
//! [annotation]
//! id = 0
//! raw_year = 7
//! population = "Group ID"   # columns may also be named
//! latitude = 14
//! longitude = 15
//!
//! [segments]
//! participant_a = "iid1"
//! participant_b = "iid2"
//! length = "lengthM"
//!
//! [time]
//! epoch_offset = 1950
//! bucket_width = 1000
//!
//! [service]
//! query_deadline_ms = 5000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{DEFAULT_BUCKET_WIDTH, MAX_ABS_YEAR};
use crate::{Error, Result};

// ============================================================================
// Column references
// ============================================================================

/// A source column, addressed by zero-based position or by header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    /// Resolve against a header row. Name lookup is exact after trimming.
    pub fn resolve(&self, header: &[&str]) -> Option<usize> {
        match self {
            ColumnRef::Index(i) => (*i < header.len()).then_some(*i),
            ColumnRef::Name(name) => header.iter().position(|h| h.trim() == name),
        }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "column #{i}"),
            ColumnRef::Name(n) => write!(f, "column '{n}'"),
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i)
    }
}

impl From<&str> for ColumnRef {
    fn from(s: &str) -> Self {
        ColumnRef::Name(s.to_string())
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Where the five consumed annotation fields live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationColumns {
    pub id: ColumnRef,
    pub raw_year: ColumnRef,
    pub population: ColumnRef,
    pub latitude: ColumnRef,
    pub longitude: ColumnRef,
}

impl Default for AnnotationColumns {
    fn default() -> Self {
        // AADR header names are inconsistent between releases; positions are not.
        Self {
            id: ColumnRef::Index(0),
            raw_year: ColumnRef::Index(7),
            population: ColumnRef::Index(13),
            latitude: ColumnRef::Index(14),
            longitude: ColumnRef::Index(15),
        }
    }
}

impl AnnotationColumns {
    /// Reject two fields mapped to the same column.
    pub fn validate(&self) -> Result<()> {
        check_distinct("annotation", &self.named())
    }

    fn named(&self) -> [(&'static str, &ColumnRef); 5] {
        [
            ("id", &self.id),
            ("raw_year", &self.raw_year),
            ("population", &self.population),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
        ]
    }
}

/// Where the pair and length fields live in the segment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentColumns {
    pub participant_a: ColumnRef,
    pub participant_b: ColumnRef,
    pub length: ColumnRef,
}

impl Default for SegmentColumns {
    fn default() -> Self {
        Self {
            participant_a: ColumnRef::from("iid1"),
            participant_b: ColumnRef::from("iid2"),
            length: ColumnRef::from("lengthM"),
        }
    }
}

impl SegmentColumns {
    pub fn validate(&self) -> Result<()> {
        check_distinct("segments", &self.named())
    }

    fn named(&self) -> [(&'static str, &ColumnRef); 3] {
        [
            ("participant_a", &self.participant_a),
            ("participant_b", &self.participant_b),
            ("length", &self.length),
        ]
    }
}

/// Date normalization and bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Subtracted from the raw year to get the "years before year zero" date.
    pub epoch_offset: i64,
    pub bucket_width: i64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            epoch_offset: 1950,
            bucket_width: DEFAULT_BUCKET_WIDTH,
        }
    }
}

impl TimeConfig {
    /// `bucket_width` must be positive and `epoch_offset` within
    /// ±[`MAX_ABS_YEAR`], which keeps every date subtraction in range.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_width <= 0 {
            return Err(Error::Config(format!(
                "time.bucket_width must be positive, got {}",
                self.bucket_width
            )));
        }
        if self.epoch_offset.unsigned_abs() > MAX_ABS_YEAR.unsigned_abs() {
            return Err(Error::Config(format!(
                "time.epoch_offset must be within ±{MAX_ABS_YEAR}, got {}",
                self.epoch_offset
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub query_deadline_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { query_deadline_ms: 5_000 }
    }
}

impl ServiceConfig {
    pub fn query_deadline(&self) -> Duration {
        Duration::from_millis(self.query_deadline_ms)
    }
}

// ============================================================================
// IbdConfig
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IbdConfig {
    pub annotation: AnnotationColumns,
    pub segments: SegmentColumns,
    pub time: TimeConfig,
    pub service: ServiceConfig,
}

impl IbdConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: IbdConfig = toml::from_str(s)
            .map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that would make loading or bucketing ill-defined.
    pub fn validate(&self) -> Result<()> {
        self.time.validate()?;
        if self.service.query_deadline_ms == 0 {
            return Err(Error::Config("service.query_deadline_ms must be positive".into()));
        }
        self.annotation.validate()?;
        self.segments.validate()
    }
}

fn check_distinct(section: &str, columns: &[(&'static str, &ColumnRef)]) -> Result<()> {
    for (i, (name, col)) in columns.iter().enumerate() {
        if let Some((other, _)) = columns[i + 1..].iter().find(|(_, c)| c == col) {
            return Err(Error::Config(format!(
                "{section}.{name} and {section}.{other} both map to {col}"
            )));
        }
    }
    Ok(())
}
