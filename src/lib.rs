//! # ibd-map - IBD match aggregation over time and space
//!
//! Finds every individual sharing identity-by-descent segments with a
//! selected individual, totals the shared length per partner, attaches
//! where and when each partner lived, and narrows the result to one
//! millennium and a strength interval.
//!
//! ## Design Principles
//!
//! 1. **Load once, read forever**: the base tables are reconciled at startup
//!    and never mutated; every query is a pure function over `&IbdMap`
//! 2. **Orientation-free totals**: segments are grouped on an unordered
//!    `PairKey`, so `(a, b)` and `(b, a)` rows always sum together
//! 3. **Layout in config, not code**: input columns are mapped through a
//!    validated `IbdConfig`
//! 4. **Typed failures**: bad files, bad bounds and unknown individuals each
//!    have their own `Error` variant
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ibd_map::{IbdConfig, IbdMap, Query};
//!
//! # fn example() -> ibd_map::Result<()> {
//! let map = IbdMap::open("ibd220.ibd.tsv", "v54.1_1240K_public.anno", &IbdConfig::default())?;
//!
//! let query = Query::parse("I0708", Some(4000), "0", "100")?;
//! let result = map.query(&query)?;
//!
//! for m in &result.matches {
//!     println!("{}\t{:.3} M\t{}\t{}", m.id, m.summed_length, m.population, m.age_label);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod loader;
pub mod storage;
pub mod reconcile;
pub mod query;
pub mod export;
#[cfg(feature = "service")]
pub mod service;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    IndividualId, PairKey, SegmentRecord, AnnotationRecord, MatchResult,
    BinEdges, BinRange,
};

// ============================================================================
// Re-exports: Tables, loading, configuration
// ============================================================================

pub use storage::{SegmentStore, AnnotationTable};
pub use loader::{AnnotationLoader, SegmentLoader};
pub use config::{IbdConfig, ColumnRef};
pub use reconcile::{Reconciled, ReconcileReport};

// ============================================================================
// Re-exports: Query pipeline
// ============================================================================

pub use query::{Query, QueryResult, LengthBounds, PartnerTotals};

#[cfg(feature = "service")]
pub use service::QueryService;

// ============================================================================
// Top-level IbdMap handle
// ============================================================================

/// The immutable data context. Holds the reconciled base tables and
/// answers queries against them.
///
/// `IbdMap` is `Send + Sync` and has no interior mutability, so one
/// instance can be shared behind an `Arc` by any number of readers.
#[derive(Debug, Clone)]
pub struct IbdMap {
    segments: SegmentStore,
    annotations: AnnotationTable,
    report: ReconcileReport,
    edges: Option<BinEdges>,
}

impl IbdMap {
    /// Load both files with `config` and reconcile them.
    pub fn open(
        segment_path: impl AsRef<Path>,
        annotation_path: impl AsRef<Path>,
        config: &IbdConfig,
    ) -> Result<Self> {
        config.validate()?;
        let annotations = AnnotationLoader::new(config).load(annotation_path)?;
        let segments = SegmentLoader::new(config).load(segment_path)?;
        Ok(Self::from_tables(segments, annotations))
    }

    /// Reconcile already-loaded tables.
    pub fn from_tables(segments: SegmentStore, annotations: AnnotationTable) -> Self {
        let Reconciled { segments, annotations, report } = reconcile::reconcile(&segments, &annotations);
        let edges = annotations.bin_edges();
        Self { segments, annotations, report, edges }
    }

    /// Run one query through the pipeline.
    pub fn query(&self, query: &Query) -> Result<QueryResult> {
        let started = Instant::now();
        let id = query.individual.as_str();
        let bounds = LengthBounds::new(query.bounds.lower, query.bounds.upper)?;

        let selected = self
            .annotations
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("individual '{id}'")))?
            .clone();

        // Phase 1: Aggregate shared length per partner
        let totals = query::aggregate(&self.segments, id);

        // Phase 2: Join with annotations
        let joined = query::join(&totals, &self.annotations);

        // Phase 3: Bucket range present for this individual
        let bin_range = query::resolve(&joined);

        // Phase 4: Filter to one bucket and length interval
        let bucket = query.bucket.or(bin_range.as_ref().map(|r| r.min));
        let matches = match bucket {
            Some(b) => query::filter(&joined, b, bounds),
            None => Vec::new(),
        };

        debug!(
            individual = id,
            partners = joined.len(),
            matches = matches.len(),
            bucket,
            elapsed_us = started.elapsed().as_micros() as u64,
            "query answered"
        );

        Ok(QueryResult {
            selected,
            bucket,
            bin_range,
            total_partners: joined.len(),
            matches,
        })
    }

    pub fn segments(&self) -> &SegmentStore {
        &self.segments
    }

    pub fn annotations(&self) -> &AnnotationTable {
        &self.annotations
    }

    /// Diagnostics from reconciliation at construction.
    pub fn report(&self) -> &ReconcileReport {
        &self.report
    }

    /// Global bucket edges over the reconciled annotation table.
    pub fn bin_edges(&self) -> Option<BinEdges> {
        self.edges
    }

    /// Every queryable individual, sorted.
    pub fn individuals(&self) -> Vec<&IndividualId> {
        let mut ids: Vec<&IndividualId> = self.annotations.ids().collect();
        ids.sort();
        ids
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Format error in {file} at line {line}: {message}")]
    Format { file: String, line: usize, message: String },

    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query exceeded its deadline of {0:?}")]
    Timeout(std::time::Duration),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
