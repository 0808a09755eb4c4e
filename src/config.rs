//! Environment configuration
//!
//! Shared by the server and the command-line binaries.

use std::path::PathBuf;

use crate::costing::{MissingOfferPolicy, SummaryOptions};

/// Environment variable holding the catalog database path
pub const DATABASE_PATH_VAR: &str = "RECIPE_COSTING_DATABASE_PATH";

/// Environment variable selecting the missing-offer policy (`flag` or `fail`)
pub const MISSING_OFFERS_VAR: &str = "RECIPE_COSTING_MISSING_OFFERS";

/// Get the catalog database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("catalog.db");
            path
        })
}

/// Summary options from environment, defaulting to flagging unpriced ingredients
pub fn summary_options() -> SummaryOptions {
    let missing_offers = match std::env::var(MISSING_OFFERS_VAR) {
        Ok(value) => MissingOfferPolicy::from_str(&value).unwrap_or_else(|| {
            tracing::warn!(
                value = %value,
                "unrecognized {}; using flag",
                MISSING_OFFERS_VAR
            );
            MissingOfferPolicy::Flag
        }),
        Err(_) => MissingOfferPolicy::Flag,
    };

    SummaryOptions { missing_offers }
}
