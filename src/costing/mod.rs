//! Recipe costing
//!
//! Finds the cheapest supplier offer for every ingredient and reduces each
//! recipe to a total cost and an aggregated nutrient profile.

pub mod pricing;
pub mod summary;

use serde::{Deserialize, Serialize};

pub use pricing::{cost_per_base_unit, select_cheapest, CheapestOffer};
pub use summary::Costing;

/// What to do with an ingredient that no supplier offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingOfferPolicy {
    /// Leave the ingredient unpriced and list it in the summary
    #[default]
    Flag,
    /// Abort the recipe with an error
    Fail,
}

impl MissingOfferPolicy {
    /// Parse from a configuration string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flag" | "warn" => Some(MissingOfferPolicy::Flag),
            "fail" | "error" => Some(MissingOfferPolicy::Fail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissingOfferPolicy::Flag => "flag",
            MissingOfferPolicy::Fail => "fail",
        }
    }
}

/// Options applied while summarizing recipes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    #[serde(default)]
    pub missing_offers: MissingOfferPolicy,
}
