//! In-memory catalog
//!
//! Holds reference data directly, either built in code or deserialized from
//! a JSON document.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogError, CatalogResult};
use crate::models::{ConversionRule, Product, Recipe, UnitOfMeasure, UoMType};
use crate::nutrition::units::{standard_base_uom, standard_conversion_rules, NUTRIENT_BASE_UOM};

fn standard_base_units() -> Vec<UnitOfMeasure> {
    UoMType::ALL.iter().map(|t| standard_base_uom(*t)).collect()
}

fn default_nutrient_base() -> UnitOfMeasure {
    NUTRIENT_BASE_UOM
}

/// Catalog backed by plain collections
///
/// Missing `baseUnits`, `conversionRules`, or `nutrientBaseUoM` in JSON fall
/// back to the standard tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemoryCatalog {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub products_by_ingredient: IndexMap<String, Vec<Product>>,
    #[serde(default = "standard_base_units")]
    pub base_units: Vec<UnitOfMeasure>,
    #[serde(default = "standard_conversion_rules")]
    pub conversion_rules: Vec<ConversionRule>,
    #[serde(default = "default_nutrient_base", rename = "nutrientBaseUoM")]
    pub nutrient_base_uom: UnitOfMeasure,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self {
            recipes: Vec::new(),
            products_by_ingredient: IndexMap::new(),
            base_units: standard_base_units(),
            conversion_rules: standard_conversion_rules(),
            nutrient_base_uom: NUTRIENT_BASE_UOM,
        }
    }
}

impl InMemoryCatalog {
    /// Empty catalog with the standard base units and conversion table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Append candidate products for an ingredient
    pub fn with_products(mut self, ingredient: impl Into<String>, products: Vec<Product>) -> Self {
        self.products_by_ingredient
            .entry(ingredient.into())
            .or_default()
            .extend(products);
        self
    }

    /// Replace the base unit for the unit's category
    pub fn with_base_unit(mut self, base: UnitOfMeasure) -> Self {
        self.base_units.retain(|b| b.uom_type != base.uom_type);
        self.base_units.push(base);
        self
    }

    /// Replace the whole conversion table
    pub fn with_conversion_rules(mut self, rules: Vec<ConversionRule>) -> Self {
        self.conversion_rules = rules;
        self
    }

    pub fn with_nutrient_base_uom(mut self, base: UnitOfMeasure) -> Self {
        self.nutrient_base_uom = base;
        self
    }
}

impl Catalog for InMemoryCatalog {
    fn recipes(&self) -> CatalogResult<Vec<Recipe>> {
        Ok(self.recipes.clone())
    }

    fn products_for_ingredient(&self, ingredient: &str) -> CatalogResult<Vec<Product>> {
        Ok(self
            .products_by_ingredient
            .get(ingredient)
            .cloned()
            .unwrap_or_default())
    }

    fn base_uom(&self, uom_type: UoMType) -> CatalogResult<UnitOfMeasure> {
        self.base_units
            .iter()
            .find(|b| b.uom_type == uom_type)
            .copied()
            .ok_or(CatalogError::BaseUnitMissing(uom_type))
    }

    fn units_data(&self) -> CatalogResult<Vec<ConversionRule>> {
        Ok(self.conversion_rules.clone())
    }

    fn nutrient_base_uom(&self) -> CatalogResult<UnitOfMeasure> {
        Ok(self.nutrient_base_uom)
    }
}
