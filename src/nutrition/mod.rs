//! Nutrition calculation module
//!
//! Handles unit conversions and nutrient aggregation.

pub mod aggregate;
pub mod converter;
pub mod units;

pub use aggregate::{
    aggregate, collation_key, compare_names, normalize_to_base_units, sort_alphabetically,
};
pub use converter::UnitConverter;
pub use units::{standard_base_uom, standard_conversion_rules, NUTRIENT_BASE_UOM};
