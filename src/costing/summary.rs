//! Recipe summarization
//!
//! Drives the costing pipeline for whole recipes: per line item it prices the
//! cheapest offer, charges it for the required base-unit quantity, and
//! collects the winning product's nutrients for aggregation.

use crate::catalog::Catalog;
use crate::error::{CostingError, CostingResult};
use crate::models::{
    LineItem, NutrientFact, Recipe, RecipeSummaries, RecipeSummary, SupplierProduct,
    UnitOfMeasure,
};
use crate::nutrition::{aggregate, normalize_to_base_units, sort_alphabetically, UnitConverter};

use super::pricing::{cost_per_base_unit, select_cheapest, CheapestOffer};
use super::{MissingOfferPolicy, SummaryOptions};

/// Costing pipeline bound to one catalog
///
/// The conversion table and nutrient base unit are read once when the
/// pipeline is built; everything else is looked up per call.
pub struct Costing<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    converter: UnitConverter,
    nutrient_base: UnitOfMeasure,
    options: SummaryOptions,
}

impl<'a, C: Catalog + ?Sized> Costing<'a, C> {
    pub fn new(catalog: &'a C) -> CostingResult<Self> {
        let converter = UnitConverter::new(catalog.units_data()?);
        let nutrient_base = catalog.nutrient_base_uom()?;
        tracing::debug!(rules = converter.len(), "loaded conversion table");

        Ok(Self {
            catalog,
            converter,
            nutrient_base,
            options: SummaryOptions::default(),
        })
    }

    pub fn with_options(mut self, options: SummaryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Price of one base unit of an offer, in the offer's own unit category
    pub fn cost_per_base_unit(&self, offer: &SupplierProduct) -> CostingResult<f64> {
        let base = self
            .catalog
            .base_uom(offer.supplier_product_uom.uom_type)?;
        cost_per_base_unit(&self.converter, offer, &base)
    }

    /// Cheapest offer across all candidate products for an ingredient
    pub fn cheapest_offer(&self, ingredient: &str) -> CostingResult<Option<CheapestOffer>> {
        let products = self.catalog.products_for_ingredient(ingredient)?;
        select_cheapest(&products, |offer| self.cost_per_base_unit(offer))
    }

    /// Line item quantity expressed in its category's base unit
    pub fn base_quantity(&self, item: &LineItem) -> CostingResult<UnitOfMeasure> {
        let base = self.catalog.base_uom(item.unit_of_measure.uom_type)?;
        self.converter.convert_to(&item.unit_of_measure, &base)
    }

    /// Nutrient facts converted into the nutrient base unit
    pub fn normalize_nutrients(&self, facts: &[NutrientFact]) -> CostingResult<Vec<NutrientFact>> {
        facts
            .iter()
            .map(|fact| normalize_to_base_units(&self.converter, fact, &self.nutrient_base))
            .collect()
    }

    /// Cheapest total cost and nutrient profile for one recipe
    pub fn summarize_recipe(&self, recipe: &Recipe) -> CostingResult<RecipeSummary> {
        let mut cheapest_cost = 0.0;
        let mut nutrients: Vec<NutrientFact> = Vec::new();
        let mut unpriced_ingredients = Vec::new();

        for item in &recipe.line_items {
            let required = self.base_quantity(item)?;

            let Some(offer) = self.cheapest_offer(&item.ingredient)? else {
                match self.options.missing_offers {
                    MissingOfferPolicy::Fail => {
                        return Err(CostingError::NoSupplierOffers {
                            recipe: recipe.recipe_name.clone(),
                            ingredient: item.ingredient.clone(),
                        });
                    }
                    MissingOfferPolicy::Flag => {
                        tracing::warn!(
                            recipe = %recipe.recipe_name,
                            ingredient = %item.ingredient,
                            "no supplier offers; ingredient left unpriced"
                        );
                        unpriced_ingredients.push(item.ingredient.clone());
                        continue;
                    }
                }
            };

            cheapest_cost += offer.cost_per_base_unit * required.amount;
            nutrients.extend(self.normalize_nutrients(&offer.nutrient_facts)?);
        }

        let summary = RecipeSummary {
            cheapest_cost,
            nutrients_at_cheapest_cost: sort_alphabetically(aggregate(nutrients)),
            unpriced_ingredients,
        };

        tracing::info!(
            recipe = %recipe.recipe_name,
            cheapest_cost = summary.cheapest_cost,
            nutrients = summary.nutrients_at_cheapest_cost.len(),
            "summarized recipe"
        );
        Ok(summary)
    }

    /// Summaries for every catalog recipe, in catalog order
    ///
    /// A recipe name listed twice keeps its first position and the later
    /// recipe's summary.
    pub fn summarize_all(&self) -> CostingResult<RecipeSummaries> {
        let recipes = self.catalog.recipes()?;
        let mut summaries = RecipeSummaries::with_capacity(recipes.len());

        for recipe in &recipes {
            let summary = self.summarize_recipe(recipe)?;
            summaries.insert(recipe.recipe_name.clone(), summary);
        }

        Ok(summaries)
    }
}
