//! Nutrient normalization and aggregation
//!
//! Nutrient facts are first expressed in the nutrient base unit, then merged
//! by name and ordered for presentation.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CostingResult;
use crate::models::{NutrientFact, NutrientMap, UnitOfMeasure};

use super::converter::UnitConverter;

/// Express both quantities of a fact in the nutrient base unit
pub fn normalize_to_base_units(
    converter: &UnitConverter,
    fact: &NutrientFact,
    base: &UnitOfMeasure,
) -> CostingResult<NutrientFact> {
    Ok(NutrientFact {
        nutrient_name: fact.nutrient_name.clone(),
        quantity_amount: converter.convert_to(&fact.quantity_amount, base)?,
        quantity_per: converter.convert_to(&fact.quantity_per, base)?,
    })
}

/// Merge facts that share a nutrient name
///
/// The first fact for a name seeds the entry; later facts only add their
/// `quantity_amount.amount`. `quantity_per` keeps the first fact's value even
/// when later facts were measured against a different reference quantity.
/// Facts must already be normalized to one unit.
pub fn aggregate<I>(facts: I) -> NutrientMap
where
    I: IntoIterator<Item = NutrientFact>,
{
    let mut merged = NutrientMap::new();

    for fact in facts {
        match merged.get_mut(&fact.nutrient_name) {
            Some(existing) => {
                if existing.quantity_per != fact.quantity_per {
                    tracing::debug!(
                        nutrient = %fact.nutrient_name,
                        kept = %existing.quantity_per,
                        ignored = %fact.quantity_per,
                        "merging nutrient facts with different reference quantities"
                    );
                }
                existing.quantity_amount.amount += fact.quantity_amount.amount;
            }
            None => {
                merged.insert(fact.nutrient_name.clone(), fact);
            }
        }
    }

    merged
}

/// Fold a name to its base-level collation form: case and accents removed
///
/// Names are decomposed first so precomposed and combining-mark spellings
/// of the same letter fold alike.
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let folded = name
        .nfd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c));
    for c in folded {
        // letters with no canonical decomposition
        match c {
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            'ß' => key.push_str("ss"),
            'ø' => key.push('o'),
            'đ' => key.push('d'),
            'ł' => key.push('l'),
            'ı' => key.push('i'),
            other => key.push(other),
        }
    }
    key
}

/// Compare nutrient names ignoring case and accents
///
/// Names that fold to the same key fall back to code-point order so the
/// ordering is total. A plain stable locale sort would instead leave such
/// names in first-seen order; here "Iron" always precedes "iron".
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Return the same entries ordered alphabetically by nutrient name
pub fn sort_alphabetically(map: NutrientMap) -> NutrientMap {
    let mut entries: Vec<(String, NutrientFact)> = map.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_names(a, b));
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::models::{ConversionRule, UoMName, UoMType};
    use crate::nutrition::units::NUTRIENT_BASE_UOM;

    fn grams(amount: f64) -> UnitOfMeasure {
        UnitOfMeasure::new(amount, UoMName::Grams, UoMType::Mass)
    }

    fn fact(name: &str, amount: f64) -> NutrientFact {
        NutrientFact::new(name, grams(amount), grams(100.0))
    }

    #[test]
    fn test_normalize_converts_both_quantities() {
        let converter = UnitConverter::new([ConversionRule::new(
            UoMName::Milligrams,
            UoMType::Mass,
            UoMName::Grams,
            UoMType::Mass,
            0.001,
        )]);
        let raw = NutrientFact::new(
            "Sodium",
            UnitOfMeasure::new(400.0, UoMName::Milligrams, UoMType::Mass),
            UnitOfMeasure::new(100_000.0, UoMName::Milligrams, UoMType::Mass),
        );

        let normalized = normalize_to_base_units(&converter, &raw, &NUTRIENT_BASE_UOM).unwrap();
        assert_eq!(normalized.nutrient_name, "Sodium");
        assert_relative_eq!(normalized.quantity_amount.amount, 0.4, epsilon = 1e-12);
        assert_eq!(normalized.quantity_amount.name, UoMName::Grams);
        assert_relative_eq!(normalized.quantity_per.amount, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_fails_without_rule() {
        let converter = UnitConverter::default();
        let raw = NutrientFact::new(
            "Protein",
            UnitOfMeasure::new(1.0, UoMName::Ounces, UoMType::Mass),
            grams(100.0),
        );
        assert!(normalize_to_base_units(&converter, &raw, &NUTRIENT_BASE_UOM).is_err());
    }

    #[test]
    fn test_aggregate_sums_same_name() {
        let merged = aggregate(vec![fact("Protein", 10.0), fact("Protein", 15.0)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["Protein"].quantity_amount.amount, 25.0);
    }

    #[test]
    fn test_aggregate_keeps_first_quantity_per() {
        let first = NutrientFact::new("Fat", grams(5.0), grams(100.0));
        let second = NutrientFact::new("Fat", grams(3.0), grams(50.0));
        let merged = aggregate(vec![first, second]);
        assert_eq!(merged["Fat"].quantity_amount.amount, 8.0);
        assert_eq!(merged["Fat"].quantity_per, grams(100.0));
    }

    #[test]
    fn test_aggregate_does_not_touch_source() {
        let source = vec![fact("Sugar", 1.0), fact("Sugar", 2.0)];
        let merged = aggregate(source.clone());
        assert_eq!(merged["Sugar"].quantity_amount.amount, 3.0);
        assert_eq!(source[0].quantity_amount.amount, 1.0);
    }

    #[test]
    fn test_names_differing_in_case_stay_separate() {
        let merged = aggregate(vec![fact("Iron", 1.0), fact("iron", 2.0)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_sort_case_insensitive() {
        let merged = aggregate(vec![fact("zinc", 1.0), fact("Iron", 1.0), fact("calcium", 1.0)]);
        let sorted = sort_alphabetically(merged);
        let keys: Vec<&str> = sorted.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["calcium", "Iron", "zinc"]);
    }

    #[test]
    fn test_sort_ignores_accents() {
        let merged = aggregate(vec![fact("Folate", 1.0), fact("Énergie", 1.0), fact("Calcium", 1.0)]);
        let sorted = sort_alphabetically(merged);
        let keys: Vec<&str> = sorted.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Calcium", "Énergie", "Folate"]);
    }

    #[test]
    fn test_sort_ignores_combining_accents() {
        let merged = aggregate(vec![fact("Enzyme", 1.0), fact("E\u{301}nergie", 1.0)]);
        let sorted = sort_alphabetically(merged);
        let keys: Vec<&str> = sorted.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["E\u{301}nergie", "Enzyme"]);
    }

    #[test]
    fn test_precomposed_and_decomposed_fold_alike() {
        assert_eq!(collation_key("E\u{301}nergie"), "energie");
        assert_eq!(collation_key("Énergie"), collation_key("E\u{301}nergie"));
        assert_eq!(collation_key("Œuf"), "oeuf");
        assert_eq!(collation_key("Smørrebrød"), "smorrebrod");
    }

    #[test]
    fn test_sort_preserves_values() {
        let merged = aggregate(vec![fact("b", 2.0), fact("a", 1.0)]);
        let sorted = sort_alphabetically(merged.clone());
        assert_eq!(sorted["a"], merged["a"]);
        assert_eq!(sorted["b"], merged["b"]);
    }

    #[test]
    fn test_compare_names_total_on_equal_keys() {
        assert_eq!(compare_names("iron", "Iron"), "iron".cmp("Iron"));
        assert_eq!(compare_names("Iron", "iron"), Ordering::Less);
        assert_eq!(collation_key("Crème Brûlée"), "creme brulee");
    }
}
