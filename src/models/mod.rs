// src/models/mod.rs

//! Domain models for the catalog library.
//!
//! Records produced by the extractors, the page schemas that drive them,
//! and application configuration.

mod config;
mod phone;
mod schema;

// Re-export all public types
pub use config::{CatalogConfig, Config};
pub use phone::{
    Brand, Listing, PhoneDetails, PhoneListItem, RecordBuilder, SearchResult, SpecCategory,
    SpecField,
};
pub use schema::{
    BrandSchema, CaptionMatch, DetailSchema, ListSchema, PageSchemas, SCHEMA_VERSION, StatsSchema,
};

/// Response envelope matching the upstream query API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { status: true, data }
    }
}
