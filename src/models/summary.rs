//! Per-recipe costing result

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::NutrientFact;

/// Nutrient name to aggregated fact, in a defined order
pub type NutrientMap = IndexMap<String, NutrientFact>;

/// Recipe name to summary, in provider recipe order
pub type RecipeSummaries = IndexMap<String, RecipeSummary>;

/// Cheapest cost and the nutrient profile of the winning products
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub cheapest_cost: f64,
    pub nutrients_at_cheapest_cost: NutrientMap,
    /// Ingredients no supplier offered; they add neither cost nor nutrients
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpriced_ingredients: Vec<String>,
}

impl RecipeSummary {
    /// True when every line item resolved to a supplier offer
    pub fn is_fully_priced(&self) -> bool {
        self.unpriced_ingredients.is_empty()
    }
}
