//! Supplier offer pricing
//!
//! Normalizes offer prices to a per-base-unit cost and picks the cheapest
//! offer among an ingredient's candidate products.

use serde::Serialize;

use crate::error::{CostingError, CostingResult};
use crate::models::{NutrientFact, Product, SupplierProduct, UnitOfMeasure};
use crate::nutrition::UnitConverter;

/// The winning offer for an ingredient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheapestOffer {
    pub cost_per_base_unit: f64,
    pub product_name: String,
    pub supplier_name: String,
    /// Nutrient profile of the product that owns the winning offer
    pub nutrient_facts: Vec<NutrientFact>,
}

/// Price of one base unit of an offer
///
/// `base` is the base unit for the offer's unit category. An offer whose
/// quantity converts to zero base units is rejected.
pub fn cost_per_base_unit(
    converter: &UnitConverter,
    offer: &SupplierProduct,
    base: &UnitOfMeasure,
) -> CostingResult<f64> {
    let converted = converter.convert_to(&offer.supplier_product_uom, base)?;

    if converted.amount == 0.0 {
        return Err(CostingError::ZeroQuantity {
            quantity: offer.supplier_product_uom,
            base_name: base.name,
        });
    }

    Ok(offer.supplier_price / converted.amount)
}

/// Scan every offer of every product and keep the strictly cheapest
///
/// Products and offers are visited in slice order; an offer only replaces
/// the current best when it is strictly cheaper, so the first offer at the
/// minimum cost wins ties. Returns `None` when there are no offers at all.
pub fn select_cheapest<F>(products: &[Product], mut cost_of: F) -> CostingResult<Option<CheapestOffer>>
where
    F: FnMut(&SupplierProduct) -> CostingResult<f64>,
{
    let mut best: Option<(f64, &Product, &SupplierProduct)> = None;

    for product in products {
        for offer in &product.supplier_products {
            let cost = cost_of(offer)?;
            tracing::debug!(
                product = %product.product_name,
                supplier = %offer.supplier_name,
                cost_per_base_unit = cost,
                "evaluated supplier offer"
            );

            let is_cheaper = match best {
                Some((best_cost, _, _)) => cost < best_cost,
                None => true,
            };
            if is_cheaper {
                best = Some((cost, product, offer));
            }
        }
    }

    Ok(best.map(|(cost, product, offer)| CheapestOffer {
        cost_per_base_unit: cost,
        product_name: product.product_name.clone(),
        supplier_name: offer.supplier_name.clone(),
        nutrient_facts: product.nutrient_facts.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::models::{UoMName, UoMType};

    fn grams(amount: f64) -> UnitOfMeasure {
        UnitOfMeasure::new(amount, UoMName::Grams, UoMType::Mass)
    }

    fn offer(supplier: &str, price: f64, uom: UnitOfMeasure) -> SupplierProduct {
        SupplierProduct {
            supplier_name: supplier.to_string(),
            supplier_price: price,
            supplier_product_uom: uom,
        }
    }

    /// One product per price, each offering one gram, tagged by a nutrient
    fn products_priced(prices: &[f64]) -> Vec<Product> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Product {
                product_name: format!("product-{}", i),
                supplier_products: vec![offer(&format!("supplier-{}", i), price, grams(1.0))],
                nutrient_facts: vec![NutrientFact::new(
                    format!("marker-{}", i),
                    grams(1.0),
                    grams(100.0),
                )],
            })
            .collect()
    }

    fn base_cost(offer: &SupplierProduct) -> CostingResult<f64> {
        cost_per_base_unit(&UnitConverter::standard(), offer, &grams(1.0))
    }

    #[test]
    fn test_cost_per_base_unit_converts_offer() {
        let converter = UnitConverter::standard();
        let bag = offer("Mill", 2.0, UnitOfMeasure::new(1.0, UoMName::Kilograms, UoMType::Mass));
        let cost = cost_per_base_unit(&converter, &bag, &grams(1.0)).unwrap();
        assert_relative_eq!(cost, 0.002);
    }

    #[test]
    fn test_cost_per_base_unit_rejects_negative_quantity() {
        let converter = UnitConverter::standard();
        let bogus = offer("Mill", 50.0, grams(-1.0));
        let err = cost_per_base_unit(&converter, &bogus, &grams(1.0)).unwrap_err();
        assert!(matches!(err, CostingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_cost_per_base_unit_rejects_zero_quantity() {
        let converter = UnitConverter::standard();
        let empty = offer("Mill", 2.0, grams(0.0));
        let err = cost_per_base_unit(&converter, &empty, &grams(1.0)).unwrap_err();
        assert!(matches!(err, CostingError::ZeroQuantity { .. }));
    }

    #[test]
    fn test_cost_per_base_unit_propagates_conversion_failure() {
        let converter = UnitConverter::default();
        let bag = offer("Mill", 2.0, UnitOfMeasure::new(1.0, UoMName::Pounds, UoMType::Mass));
        let err = cost_per_base_unit(&converter, &bag, &grams(1.0)).unwrap_err();
        assert!(matches!(err, CostingError::ConversionNotFound { .. }));
    }

    #[test]
    fn test_select_first_of_tied_minimum() {
        let products = products_priced(&[5.0, 3.0, 3.0, 7.0]);
        let best = select_cheapest(&products, base_cost).unwrap().unwrap();
        assert_eq!(best.cost_per_base_unit, 3.0);
        assert_eq!(best.product_name, "product-1");
        assert_eq!(best.supplier_name, "supplier-1");
        assert_eq!(best.nutrient_facts[0].nutrient_name, "marker-1");
    }

    #[test]
    fn test_select_across_offers_of_one_product() {
        let products = vec![Product {
            product_name: "Flour".to_string(),
            supplier_products: vec![
                offer("A", 4.0, grams(1000.0)),
                offer("B", 1.5, grams(500.0)),
                offer("C", 1.0, grams(250.0)),
            ],
            nutrient_facts: Vec::new(),
        }];
        let best = select_cheapest(&products, base_cost).unwrap().unwrap();
        assert_eq!(best.supplier_name, "B");
        assert_relative_eq!(best.cost_per_base_unit, 0.003);
    }

    #[test]
    fn test_select_with_no_candidates_is_none() {
        assert!(select_cheapest(&[], base_cost).unwrap().is_none());

        let offerless = vec![Product {
            product_name: "Ghost".to_string(),
            supplier_products: Vec::new(),
            nutrient_facts: vec![NutrientFact::new("Iron", grams(1.0), grams(100.0))],
        }];
        assert!(select_cheapest(&offerless, base_cost).unwrap().is_none());
    }

    #[test]
    fn test_select_stops_on_pricing_error() {
        let mut products = products_priced(&[2.0]);
        products[0]
            .supplier_products
            .push(offer("Broken", 1.0, grams(0.0)));
        assert!(select_cheapest(&products, base_cost).is_err());
    }
}
