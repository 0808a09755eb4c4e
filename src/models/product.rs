//! Product, supplier offer, and nutrient fact models

use serde::{Deserialize, Serialize};

use super::UnitOfMeasure;

/// A nutrient quantity measured per some reference quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientFact {
    pub nutrient_name: String,
    pub quantity_amount: UnitOfMeasure,
    pub quantity_per: UnitOfMeasure,
}

impl NutrientFact {
    pub fn new(
        nutrient_name: impl Into<String>,
        quantity_amount: UnitOfMeasure,
        quantity_per: UnitOfMeasure,
    ) -> Self {
        Self {
            nutrient_name: nutrient_name.into(),
            quantity_amount,
            quantity_per,
        }
    }
}

/// One supplier's priced offer, priced per the stated quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierProduct {
    #[serde(default)]
    pub supplier_name: String,
    pub supplier_price: f64,
    #[serde(rename = "supplierProductUoM")]
    pub supplier_product_uom: UnitOfMeasure,
}

/// A product with its supplier offers and a single nutrient profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub supplier_products: Vec<SupplierProduct>,
    #[serde(default)]
    pub nutrient_facts: Vec<NutrientFact>,
}
