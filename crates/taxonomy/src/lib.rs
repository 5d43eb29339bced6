//! # Checklist Taxonomy
//!
//! Loaders and flatteners for the two security-control standards served by
//! the engine:
//!
//! - the **application standard** (nested category → section → item JSON,
//!   controls with minimum levels and per-category tag sets), and
//! - the **pipeline standard** (CSV rows with per-level applicability flags
//!   and external NIST/OWASP/CWE mappings).
//!
//! Both loaders run exactly once at process start and produce immutable
//! in-memory indexes; a document that cannot be parsed into the expected
//! nested shape is a fatal error. Everything downstream (query, scoring)
//! reads these indexes and never mutates them.

mod application;
mod classification;
mod error;
mod pipeline;
mod types;

pub use application::{
    application_index, RawCategory, RawItem, RawLevel, RawSection, StandardDocument, TaxonomyIndex,
};
pub use classification::{tags_for, CategoryTags, EVERYONE};
pub use error::{Result, TaxonomyError};
pub use pipeline::{pipeline_index, PipelineCategory, PipelineIndex, Requirement, Subcategory};
pub use types::{Category, Control, Ordinal, StandardInfo};
