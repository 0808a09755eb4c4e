//! Units of measure and conversion rules
//!
//! A quantity is always tagged with both a unit name and a unit category;
//! conversions are only defined between explicit (name, type) pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UoMType {
    Mass,
    Volume,
    Count,
}

impl UoMType {
    pub const ALL: [UoMType; 3] = [UoMType::Mass, UoMType::Volume, UoMType::Count];

    /// Parse from a stored string
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mass" => Some(UoMType::Mass),
            "volume" => Some(UoMType::Volume),
            "count" => Some(UoMType::Count),
            _ => None,
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            UoMType::Mass => "mass",
            UoMType::Volume => "volume",
            UoMType::Count => "count",
        }
    }
}

impl fmt::Display for UoMType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Name of a unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UoMName {
    Milligrams,
    Grams,
    Kilograms,
    Ounces,
    Pounds,
    Milliliters,
    Liters,
    Teaspoons,
    Tablespoons,
    Cups,
    FluidOunces,
    Pints,
    Quarts,
    Gallons,
    Whole,
    Pieces,
    Dozen,
}

impl UoMName {
    pub const ALL: [UoMName; 17] = [
        UoMName::Milligrams,
        UoMName::Grams,
        UoMName::Kilograms,
        UoMName::Ounces,
        UoMName::Pounds,
        UoMName::Milliliters,
        UoMName::Liters,
        UoMName::Teaspoons,
        UoMName::Tablespoons,
        UoMName::Cups,
        UoMName::FluidOunces,
        UoMName::Pints,
        UoMName::Quarts,
        UoMName::Gallons,
        UoMName::Whole,
        UoMName::Pieces,
        UoMName::Dozen,
    ];

    /// Convert to database string (matches the JSON spelling)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            UoMName::Milligrams => "milligrams",
            UoMName::Grams => "grams",
            UoMName::Kilograms => "kilograms",
            UoMName::Ounces => "ounces",
            UoMName::Pounds => "pounds",
            UoMName::Milliliters => "milliliters",
            UoMName::Liters => "liters",
            UoMName::Teaspoons => "teaspoons",
            UoMName::Tablespoons => "tablespoons",
            UoMName::Cups => "cups",
            UoMName::FluidOunces => "fluidOunces",
            UoMName::Pints => "pints",
            UoMName::Quarts => "quarts",
            UoMName::Gallons => "gallons",
            UoMName::Whole => "whole",
            UoMName::Pieces => "pieces",
            UoMName::Dozen => "dozen",
        }
    }

    /// Parse from a stored string
    pub fn from_db_str(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.to_db_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for UoMName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// A quantity tagged with its unit name and category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    #[serde(rename = "uomAmount")]
    pub amount: f64,
    #[serde(rename = "uomName")]
    pub name: UoMName,
    #[serde(rename = "uomType")]
    pub uom_type: UoMType,
}

impl UnitOfMeasure {
    pub fn new(amount: f64, name: UoMName, uom_type: UoMType) -> Self {
        Self {
            amount,
            name,
            uom_type,
        }
    }

    /// True when both quantities are expressed in the same unit
    pub fn same_unit(&self, name: UoMName, uom_type: UoMType) -> bool {
        self.name == name && self.uom_type == uom_type
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.amount, self.name, self.uom_type)
    }
}

/// A directed, category-scoped conversion factor
///
/// Converting `x` units of `(from_name, from_type)` yields `x * factor`
/// units of `(to_name, to_type)`. The reverse direction needs its own rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    #[serde(rename = "fromUnitName")]
    pub from_name: UoMName,
    #[serde(rename = "fromUnitType")]
    pub from_type: UoMType,
    #[serde(rename = "toUnitName")]
    pub to_name: UoMName,
    #[serde(rename = "toUnitType")]
    pub to_type: UoMType,
    #[serde(rename = "conversionFactor")]
    pub factor: f64,
}

impl ConversionRule {
    pub fn new(
        from_name: UoMName,
        from_type: UoMType,
        to_name: UoMName,
        to_type: UoMType,
        factor: f64,
    ) -> Self {
        Self {
            from_name,
            from_type,
            to_name,
            to_type,
            factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uom_name_db_round_trip() {
        for name in UoMName::ALL {
            assert_eq!(UoMName::from_db_str(name.to_db_str()), Some(name));
        }
        assert_eq!(UoMName::from_db_str("fluidounces"), Some(UoMName::FluidOunces));
        assert_eq!(UoMName::from_db_str("scoop"), None);
    }

    #[test]
    fn test_uom_type_from_db_str() {
        assert_eq!(UoMType::from_db_str("Mass"), Some(UoMType::Mass));
        assert_eq!(UoMType::from_db_str(" volume "), Some(UoMType::Volume));
        assert_eq!(UoMType::from_db_str("weight"), None);
    }

    #[test]
    fn test_unit_of_measure_json_field_names() {
        let uom = UnitOfMeasure::new(2.5, UoMName::FluidOunces, UoMType::Volume);
        let json = serde_json::to_value(uom).unwrap();
        assert_eq!(json["uomAmount"], 2.5);
        assert_eq!(json["uomName"], "fluidOunces");
        assert_eq!(json["uomType"], "volume");
    }

    #[test]
    fn test_conversion_rule_deserialize() {
        let rule: ConversionRule = serde_json::from_str(
            r#"{"fromUnitName":"kilograms","fromUnitType":"mass","toUnitName":"grams","toUnitType":"mass","conversionFactor":1000}"#,
        )
        .unwrap();
        assert_eq!(rule.from_name, UoMName::Kilograms);
        assert_eq!(rule.to_name, UoMName::Grams);
        assert_eq!(rule.factor, 1000.0);
    }
}
