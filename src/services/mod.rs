//! Service layer for the catalog library.
//!
//! This module contains the query facade (`Catalog`), which pairs one page
//! fetch with one extraction or ranking step per operation.

mod catalog;

pub use catalog::Catalog;
