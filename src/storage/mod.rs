//! # Base Tables
//!
//! The two immutable tables every query reads from.
//!
//! | Table | Module | Keyed by |
//! |-------|--------|----------|
//! | `SegmentStore` | `segments` | participant (either slot) |
//! | `AnnotationTable` | `annotations` | individual id |
//!
//! Both are built once by the loaders, narrowed by
//! [`reconcile`](crate::reconcile::reconcile), and never mutated after
//! that. Narrowing returns a new table rather than editing in place.

pub mod segments;
pub mod annotations;

pub use segments::SegmentStore;
pub use annotations::AnnotationTable;
