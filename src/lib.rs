//! Recipe Costing Library
//!
//! Cheapest-supplier recipe costing: unit conversion, per-base-unit pricing,
//! and nutrient aggregation over a reference catalog.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod costing;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;

pub use catalog::{Catalog, CatalogError, InMemoryCatalog, SqliteCatalog};
pub use costing::{Costing, MissingOfferPolicy, SummaryOptions};
pub use error::{CostingError, CostingResult};
