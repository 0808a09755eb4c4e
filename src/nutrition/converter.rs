//! Unit conversion
//!
//! Converts quantities between units using an explicit table of directed
//! conversion rules. Only identity conversions and direct rules are honored;
//! rules are never inverted or chained.

use std::collections::HashMap;

use crate::error::{CostingError, CostingResult};
use crate::models::{ConversionRule, UnitOfMeasure, UoMName, UoMType};

use super::units::standard_conversion_rules;

type RuleKey = (UoMName, UoMType, UoMName, UoMType);

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Converts quantities using a fixed table of conversion rules
#[derive(Debug, Clone, Default)]
pub struct UnitConverter {
    factors: HashMap<RuleKey, f64>,
}

impl UnitConverter {
    /// Index a rule table. When a key appears more than once the first rule wins.
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ConversionRule>,
    {
        let mut factors = HashMap::new();
        for rule in rules {
            factors
                .entry((rule.from_name, rule.from_type, rule.to_name, rule.to_type))
                .or_insert(rule.factor);
        }
        Self { factors }
    }

    /// Converter over the built-in standard table
    pub fn standard() -> Self {
        Self::new(standard_conversion_rules())
    }

    /// Number of distinct rules
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Look up the direct factor between two units, if a rule exists
    pub fn factor(
        &self,
        from_name: UoMName,
        from_type: UoMType,
        to_name: UoMName,
        to_type: UoMType,
    ) -> Option<f64> {
        self.factors
            .get(&(from_name, from_type, to_name, to_type))
            .copied()
    }

    /// Convert a quantity into the requested unit
    ///
    /// Returns the quantity unchanged when it is already in the target unit,
    /// whether or not the table has a rule for it. Every quantity entering
    /// the costing pipeline passes through here, so this is where negative
    /// or non-finite amounts and factors are rejected.
    pub fn convert(
        &self,
        quantity: &UnitOfMeasure,
        to_name: UoMName,
        to_type: UoMType,
    ) -> CostingResult<UnitOfMeasure> {
        if !is_valid_amount(quantity.amount) {
            return Err(CostingError::InvalidAmount {
                quantity: *quantity,
            });
        }

        if quantity.same_unit(to_name, to_type) {
            return Ok(*quantity);
        }

        let factor = self
            .factor(quantity.name, quantity.uom_type, to_name, to_type)
            .ok_or(CostingError::ConversionNotFound {
                from_name: quantity.name,
                from_type: quantity.uom_type,
                to_name,
                to_type,
            })?;

        if !is_valid_amount(factor) {
            return Err(CostingError::InvalidFactor {
                from_name: quantity.name,
                from_type: quantity.uom_type,
                to_name,
                to_type,
                factor,
            });
        }

        Ok(UnitOfMeasure::new(quantity.amount * factor, to_name, to_type))
    }

    /// Convert a quantity into the unit of `target` (its amount is ignored)
    pub fn convert_to(
        &self,
        quantity: &UnitOfMeasure,
        target: &UnitOfMeasure,
    ) -> CostingResult<UnitOfMeasure> {
        self.convert(quantity, target.name, target.uom_type)
    }

    /// Add `b` to `a`, expressing the result in `a`'s unit
    pub fn sum(&self, a: &UnitOfMeasure, b: &UnitOfMeasure) -> CostingResult<UnitOfMeasure> {
        let converted = self.convert_to(b, a)?;
        Ok(UnitOfMeasure::new(
            a.amount + converted.amount,
            a.name,
            a.uom_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::nutrition::units::{G_PER_KG, ML_PER_CUP};

    fn grams(amount: f64) -> UnitOfMeasure {
        UnitOfMeasure::new(amount, UoMName::Grams, UoMType::Mass)
    }

    fn kilograms(amount: f64) -> UnitOfMeasure {
        UnitOfMeasure::new(amount, UoMName::Kilograms, UoMType::Mass)
    }

    fn kg_to_g() -> ConversionRule {
        ConversionRule::new(
            UoMName::Kilograms,
            UoMType::Mass,
            UoMName::Grams,
            UoMType::Mass,
            1000.0,
        )
    }

    #[test]
    fn test_identity_without_rule() {
        let converter = UnitConverter::default();
        let quantity = UnitOfMeasure::new(3.25, UoMName::Tablespoons, UoMType::Volume);
        let result = converter
            .convert(&quantity, UoMName::Tablespoons, UoMType::Volume)
            .unwrap();
        assert_eq!(result, quantity);
    }

    #[test]
    fn test_same_name_different_type_is_not_identity() {
        let converter = UnitConverter::default();
        let quantity = UnitOfMeasure::new(2.0, UoMName::Ounces, UoMType::Mass);
        let err = converter
            .convert(&quantity, UoMName::Ounces, UoMType::Volume)
            .unwrap_err();
        assert!(matches!(err, CostingError::ConversionNotFound { .. }));
    }

    #[test]
    fn test_direct_rule() {
        let converter = UnitConverter::new([kg_to_g()]);
        let result = converter
            .convert(&kilograms(1.5), UoMName::Grams, UoMType::Mass)
            .unwrap();
        assert_eq!(result, grams(1500.0));
    }

    #[test]
    fn test_convert_is_deterministic() {
        let converter = UnitConverter::standard();
        let cup = UnitOfMeasure::new(2.0, UoMName::Cups, UoMType::Volume);
        let first = converter
            .convert(&cup, UoMName::Milliliters, UoMType::Volume)
            .unwrap();
        let second = converter
            .convert(&cup, UoMName::Milliliters, UoMType::Volume)
            .unwrap();
        assert_eq!(first, second);
        assert_relative_eq!(first.amount, 2.0 * ML_PER_CUP, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_rule_fails() {
        let converter = UnitConverter::new([kg_to_g()]);
        let err = converter
            .convert(&kilograms(1.0), UoMName::Pounds, UoMType::Mass)
            .unwrap_err();
        match err {
            CostingError::ConversionNotFound {
                from_name, to_name, ..
            } => {
                assert_eq!(from_name, UoMName::Kilograms);
                assert_eq!(to_name, UoMName::Pounds);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rules_are_not_inverted() {
        let converter = UnitConverter::new([kg_to_g()]);
        assert!(converter
            .convert(&grams(500.0), UoMName::Kilograms, UoMType::Mass)
            .is_err());
    }

    #[test]
    fn test_rules_are_not_chained() {
        // pounds -> grams and grams -> kilograms exist, pounds -> kilograms does not
        let converter = UnitConverter::standard();
        let pound = UnitOfMeasure::new(1.0, UoMName::Pounds, UoMType::Mass);
        assert!(converter
            .convert(&pound, UoMName::Grams, UoMType::Mass)
            .is_ok());
        assert!(converter
            .convert(&pound, UoMName::Kilograms, UoMType::Mass)
            .is_err());
    }

    #[test]
    fn test_first_duplicate_rule_wins() {
        let mut second = kg_to_g();
        second.factor = 999.0;
        let converter = UnitConverter::new([kg_to_g(), second]);
        assert_eq!(converter.len(), 1);
        assert_eq!(
            converter.factor(
                UoMName::Kilograms,
                UoMType::Mass,
                UoMName::Grams,
                UoMType::Mass
            ),
            Some(G_PER_KG)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let converter = UnitConverter::new([kg_to_g()]);
        let err = converter
            .convert(&kilograms(-1.0), UoMName::Grams, UoMType::Mass)
            .unwrap_err();
        assert!(matches!(err, CostingError::InvalidAmount { quantity } if quantity.amount == -1.0));

        // identity conversions are checked too
        let err = converter
            .convert(&grams(f64::NAN), UoMName::Grams, UoMType::Mass)
            .unwrap_err();
        assert!(matches!(err, CostingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_negative_factor_rejected() {
        let mut rule = kg_to_g();
        rule.factor = -1000.0;
        let converter = UnitConverter::new([rule]);
        let err = converter
            .convert(&kilograms(1.0), UoMName::Grams, UoMType::Mass)
            .unwrap_err();
        assert!(matches!(err, CostingError::InvalidFactor { factor, .. } if factor == -1000.0));
    }

    #[test]
    fn test_sum_in_first_unit() {
        let converter = UnitConverter::new([kg_to_g()]);
        let total = converter.sum(&grams(250.0), &kilograms(0.5)).unwrap();
        assert_eq!(total, grams(750.0));
    }

    #[test]
    fn test_sum_fails_without_rule() {
        let converter = UnitConverter::new([kg_to_g()]);
        assert!(converter.sum(&kilograms(1.0), &grams(10.0)).is_err());
    }
}
