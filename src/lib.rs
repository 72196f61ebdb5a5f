// src/lib.rs

//! Phone catalog extraction and ranking library

pub mod error;
pub mod extract;
pub mod models;
pub mod ranking;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
pub use services::Catalog;
