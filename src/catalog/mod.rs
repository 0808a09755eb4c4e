//! Reference data catalog
//!
//! The costing pipeline reads recipes, products, base units, and conversion
//! rules through the [`Catalog`] trait. Two providers ship with the crate: an
//! in-memory catalog (optionally loaded from JSON) and a SQLite catalog.

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod sqlite;

use thiserror::Error;

use crate::models::{ConversionRule, Product, Recipe, UnitOfMeasure, UoMType};

pub use connection::{Database, DbError, DbResult};
pub use memory::InMemoryCatalog;
pub use sqlite::{CatalogStats, SqliteCatalog};

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No base unit of measure configured for {0}")]
    BaseUnitMissing(UoMType),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only reference data consumed by the costing pipeline
pub trait Catalog {
    /// All recipes, in catalog order
    fn recipes(&self) -> CatalogResult<Vec<Recipe>>;

    /// Candidate products for an ingredient, in catalog order
    fn products_for_ingredient(&self, ingredient: &str) -> CatalogResult<Vec<Product>>;

    /// Canonical base unit for a unit category
    fn base_uom(&self, uom_type: UoMType) -> CatalogResult<UnitOfMeasure>;

    /// The conversion rule table
    fn units_data(&self) -> CatalogResult<Vec<ConversionRule>>;

    /// Canonical unit for nutrient quantities
    fn nutrient_base_uom(&self) -> CatalogResult<UnitOfMeasure>;
}
