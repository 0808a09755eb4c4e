//! Standard unit constants and conversion table
//!
//! Provides the canonical base units and a ready-made table of explicit
//! conversion rules built from standard kitchen conversion factors.

use crate::models::{ConversionRule, UnitOfMeasure, UoMName, UoMType};

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.353;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Count Conversion Constants (to whole items)
// ============================================================================

/// Whole items per piece
pub const WHOLE_PER_PIECE: f64 = 1.0;
/// Whole items per dozen
pub const WHOLE_PER_DOZEN: f64 = 12.0;

// ============================================================================
// Base Units
// ============================================================================

/// Canonical base unit for every nutrient quantity
pub const NUTRIENT_BASE_UOM: UnitOfMeasure = UnitOfMeasure {
    amount: 1.0,
    name: UoMName::Grams,
    uom_type: UoMType::Mass,
};

/// Get the canonical base unit for a unit category
pub fn standard_base_uom(uom_type: UoMType) -> UnitOfMeasure {
    let name = match uom_type {
        UoMType::Mass => UoMName::Grams,
        UoMType::Volume => UoMName::Milliliters,
        UoMType::Count => UoMName::Whole,
    };
    UnitOfMeasure::new(1.0, name, uom_type)
}

/// Units per category with their size expressed in the category's base unit
fn base_factors() -> [(UoMType, &'static [(UoMName, f64)]); 3] {
    [
        (
            UoMType::Mass,
            &[
                (UoMName::Milligrams, G_PER_MG),
                (UoMName::Kilograms, G_PER_KG),
                (UoMName::Ounces, G_PER_OZ),
                (UoMName::Pounds, G_PER_LB),
            ],
        ),
        (
            UoMType::Volume,
            &[
                (UoMName::Teaspoons, ML_PER_TSP),
                (UoMName::Tablespoons, ML_PER_TBSP),
                (UoMName::FluidOunces, ML_PER_FL_OZ),
                (UoMName::Cups, ML_PER_CUP),
                (UoMName::Pints, ML_PER_PINT),
                (UoMName::Quarts, ML_PER_QUART),
                (UoMName::Liters, ML_PER_LITER),
                (UoMName::Gallons, ML_PER_GALLON),
            ],
        ),
        (
            UoMType::Count,
            &[
                (UoMName::Pieces, WHOLE_PER_PIECE),
                (UoMName::Dozen, WHOLE_PER_DOZEN),
            ],
        ),
    ]
}

/// Build the standard conversion table
///
/// Every non-base unit gets an explicit rule into its category's base unit
/// and one back out of it. Units in different categories are never linked,
/// and there are no unit-to-unit rules that skip the base unit.
pub fn standard_conversion_rules() -> Vec<ConversionRule> {
    let mut rules = Vec::new();

    for (uom_type, units) in base_factors() {
        let base = standard_base_uom(uom_type).name;
        for &(name, factor) in units {
            rules.push(ConversionRule::new(name, uom_type, base, uom_type, factor));
            rules.push(ConversionRule::new(base, uom_type, name, uom_type, 1.0 / factor));
        }
    }

    rules
}
