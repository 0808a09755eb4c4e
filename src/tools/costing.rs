//! Costing MCP Tools
//!
//! Tools for listing recipes, summarizing their cheapest cost, and
//! inspecting supplier pricing and unit conversions.

use std::path::Path;

use serde::Serialize;

use crate::catalog::{Catalog, CatalogStats, InMemoryCatalog, SqliteCatalog};
use crate::costing::{CheapestOffer, Costing, SummaryOptions};
use crate::models::{RecipeSummaries, RecipeSummary, UnitOfMeasure, UoMName, UoMType};

/// Recipe entry for listing
#[derive(Debug, Serialize)]
pub struct RecipeListing {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeListing>,
    pub count: usize,
}

/// Response for summarize_recipe
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryResponse {
    pub recipe_name: String,
    #[serde(flatten)]
    pub summary: RecipeSummary,
}

/// Response for cheapest_offer
#[derive(Debug, Serialize)]
pub struct CheapestOfferResponse {
    pub ingredient: String,
    pub found: bool,
    pub offer: Option<CheapestOffer>,
}

/// Response for convert_units
#[derive(Debug, Serialize)]
pub struct ConvertUnitsResponse {
    pub from: UnitOfMeasure,
    pub to: UnitOfMeasure,
}

/// Parse a unit name and type pair from tool input
pub fn parse_unit(name: &str, uom_type: &str) -> Result<(UoMName, UoMType), String> {
    let parsed_name =
        UoMName::from_db_str(name).ok_or_else(|| format!("Unknown unit name: {}", name))?;
    let parsed_type =
        UoMType::from_db_str(uom_type).ok_or_else(|| format!("Unknown unit type: {}", uom_type))?;
    Ok((parsed_name, parsed_type))
}

// ============================================================================
// Costing Tools
// ============================================================================

/// List recipes with their ingredients
pub fn list_recipes<C: Catalog + ?Sized>(catalog: &C) -> Result<ListRecipesResponse, String> {
    let recipes = catalog
        .recipes()
        .map_err(|e| format!("Catalog error: {}", e))?;

    let recipes: Vec<RecipeListing> = recipes
        .into_iter()
        .map(|recipe| RecipeListing {
            name: recipe.recipe_name,
            ingredients: recipe
                .line_items
                .into_iter()
                .map(|item| item.ingredient)
                .collect(),
        })
        .collect();

    Ok(ListRecipesResponse {
        count: recipes.len(),
        recipes,
    })
}

/// Summarize every recipe in the catalog
pub fn summarize_recipes<C: Catalog + ?Sized>(
    catalog: &C,
    options: &SummaryOptions,
) -> Result<RecipeSummaries, String> {
    let costing = Costing::new(catalog)
        .map_err(|e| e.to_string())?
        .with_options(options.clone());
    costing.summarize_all().map_err(|e| e.to_string())
}

/// Summarize a single recipe by name (exact match)
pub fn summarize_recipe<C: Catalog + ?Sized>(
    catalog: &C,
    name: &str,
    options: &SummaryOptions,
) -> Result<Option<RecipeSummaryResponse>, String> {
    let recipes = catalog
        .recipes()
        .map_err(|e| format!("Catalog error: {}", e))?;

    let Some(recipe) = recipes.into_iter().find(|r| r.recipe_name == name) else {
        return Ok(None);
    };

    let costing = Costing::new(catalog)
        .map_err(|e| e.to_string())?
        .with_options(options.clone());
    let summary = costing
        .summarize_recipe(&recipe)
        .map_err(|e| e.to_string())?;

    Ok(Some(RecipeSummaryResponse {
        recipe_name: recipe.recipe_name,
        summary,
    }))
}

/// Find the cheapest supplier offer for an ingredient
pub fn cheapest_offer<C: Catalog + ?Sized>(
    catalog: &C,
    ingredient: &str,
) -> Result<CheapestOfferResponse, String> {
    let ingredient = ingredient.trim();
    if ingredient.is_empty() {
        return Err("Ingredient name cannot be empty".to_string());
    }

    let costing = Costing::new(catalog).map_err(|e| e.to_string())?;
    let offer = costing
        .cheapest_offer(ingredient)
        .map_err(|e| e.to_string())?;

    Ok(CheapestOfferResponse {
        ingredient: ingredient.to_string(),
        found: offer.is_some(),
        offer,
    })
}

/// Convert a quantity using the catalog's conversion table
pub fn convert_units<C: Catalog + ?Sized>(
    catalog: &C,
    amount: f64,
    from: (UoMName, UoMType),
    to: (UoMName, UoMType),
) -> Result<ConvertUnitsResponse, String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err("amount must be a non-negative number".to_string());
    }

    let costing = Costing::new(catalog).map_err(|e| e.to_string())?;
    let quantity = UnitOfMeasure::new(amount, from.0, from.1);
    let converted = costing
        .converter()
        .convert(&quantity, to.0, to.1)
        .map_err(|e| e.to_string())?;

    Ok(ConvertUnitsResponse {
        from: quantity,
        to: converted,
    })
}

/// Replace the SQLite catalog with the contents of a JSON catalog file
pub fn import_catalog_json(catalog: &SqliteCatalog, path: &Path) -> Result<CatalogStats, String> {
    let source = InMemoryCatalog::from_json_file(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    catalog
        .import(&source)
        .map_err(|e| format!("Import failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Recipe};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new().with_recipe(Recipe {
            recipe_name: "Toast".to_string(),
            line_items: vec![LineItem {
                ingredient: "Bread".to_string(),
                unit_of_measure: UnitOfMeasure::new(2.0, UoMName::Pieces, UoMType::Count),
            }],
        })
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(
            parse_unit("cups", "volume").unwrap(),
            (UoMName::Cups, UoMType::Volume)
        );
        assert!(parse_unit("scoop", "volume").is_err());
        assert!(parse_unit("cups", "liquid").is_err());
    }

    #[test]
    fn test_list_recipes() {
        let response = list_recipes(&catalog()).unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.recipes[0].ingredients, vec!["Bread".to_string()]);
    }

    #[test]
    fn test_summarize_unknown_recipe() {
        let result = summarize_recipe(&catalog(), "Soup", &SummaryOptions::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_summarize_recipe_flags_unpriced() {
        let response = summarize_recipe(&catalog(), "Toast", &SummaryOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(response.summary.unpriced_ingredients, vec!["Bread".to_string()]);
    }

    #[test]
    fn test_convert_units_reports_missing_rule() {
        let err = convert_units(
            &catalog(),
            1.0,
            (UoMName::Cups, UoMType::Volume),
            (UoMName::Grams, UoMType::Mass),
        )
        .unwrap_err();
        assert!(err.contains("Couldn't convert"));
    }

    #[test]
    fn test_convert_units_rejects_negative_amount() {
        assert!(convert_units(
            &catalog(),
            -1.0,
            (UoMName::Cups, UoMType::Volume),
            (UoMName::Milliliters, UoMType::Volume),
        )
        .is_err());
    }

    #[test]
    fn test_cheapest_offer_requires_name() {
        assert!(cheapest_offer(&catalog(), "  ").is_err());
        assert!(!cheapest_offer(&catalog(), "Bread").unwrap().found);
    }
}
