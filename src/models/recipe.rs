//! Recipe model
//!
//! A recipe is a named list of ingredient requirements.

use serde::{Deserialize, Serialize};

use super::UnitOfMeasure;

/// One ingredient requirement within a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub ingredient: String,
    pub unit_of_measure: UnitOfMeasure,
}

/// A named recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_name: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}
