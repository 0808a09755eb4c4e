//! Data models
//!
//! Immutable value records read from the catalog and produced by costing.

mod product;
mod recipe;
mod summary;
mod unit_of_measure;

pub use product::{NutrientFact, Product, SupplierProduct};
pub use recipe::{LineItem, Recipe};
pub use summary::{NutrientMap, RecipeSummaries, RecipeSummary};
pub use unit_of_measure::{ConversionRule, UnitOfMeasure, UoMName, UoMType};
