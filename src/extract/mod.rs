//! Markup extractors.
//!
//! Every extractor is compiled from a schema once and is then a pure
//! function of the parsed document: no shared state, no I/O. Elements that
//! do not fit the schema are dropped rather than reported, so a changed or
//! error page degrades to fewer (or zero) records.

mod brands;
mod details;
pub mod fields;
mod list;
mod stats;

pub use brands::BrandExtractor;
pub use details::DetailExtractor;
pub use list::ListExtractor;
pub use stats::StatsExtractor;

use crate::error::{AppError, Result};
use crate::models::{PageSchemas, SCHEMA_VERSION};

/// Compiled extractors for every known page shape.
#[derive(Debug, Clone)]
pub struct Extractors {
    pub list: ListExtractor,
    pub search: ListExtractor,
    pub stats: StatsExtractor,
    pub brands: BrandExtractor,
    pub details: DetailExtractor,
}

impl Extractors {
    /// Compile all schemas, rejecting revisions newer than this build knows.
    pub fn compile(schemas: &PageSchemas) -> Result<Self> {
        if schemas.version > SCHEMA_VERSION {
            return Err(AppError::config(format!(
                "schema version {} is newer than supported version {}",
                schemas.version, SCHEMA_VERSION
            )));
        }

        Ok(Self {
            list: ListExtractor::new(&schemas.list)?,
            search: ListExtractor::new(&schemas.search)?,
            stats: StatsExtractor::new(&schemas.stats)?,
            brands: BrandExtractor::new(&schemas.brands)?,
            details: DetailExtractor::new(&schemas.details)?,
        })
    }
}
