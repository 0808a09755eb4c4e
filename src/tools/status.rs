//! Costing Status Tool
//!
//! Provides runtime status information about the costing service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildStamp;
use crate::catalog::{CatalogStats, SqliteCatalog};
use crate::costing::SummaryOptions;

/// Usage instructions for AI assistants
pub const COSTING_INSTRUCTIONS: &str = r#"
# Recipe Costing Instructions

Every recipe is priced by picking, for each ingredient, the supplier offer with
the lowest price per base unit (grams, milliliters, or whole items).

## Typical workflow

1. `list_recipes` to see what the catalog holds
2. `summarize_recipes` (all) or `summarize_recipe` (one, exact name)
3. `cheapest_offer` to see which supplier wins for one ingredient
4. `convert_units` to check a single conversion

## Reading a summary

- `cheapestCost` is the sum over line items of
  (cheapest price per base unit) x (required quantity in base units)
- `nutrientsAtCheapestCost` sums the winning products' nutrient facts by name,
  in grams, sorted alphabetically ignoring case and accents
- `unpricedIngredients` lists ingredients no supplier offers; they add nothing
  to the cost. A summary with unpriced ingredients is NOT a real price.

## Units

- Unit types: mass, volume, count
- Conversions only use explicit rules. `pounds -> kilograms` fails unless the
  catalog has that exact rule, even though both convert to grams.

## Updating the catalog

`import_catalog` replaces the whole catalog from a JSON file with
`recipes`, `productsByIngredient`, and optionally `baseUnits`,
`conversionRules`, and `nutrientBaseUoM` (standard tables are used when absent).
"#;

/// Runtime status of the costing service
#[derive(Debug, Clone, Serialize)]
pub struct CostingStatus {
    pub build: BuildStamp,

    /// Catalog information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub catalog: Option<CatalogStats>,
    pub summary_options: SummaryOptions,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub as_of: String,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, catalog: &SqliteCatalog, options: &SummaryOptions) -> CostingStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let catalog_stats = match catalog.stats() {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(error = %e, "could not read catalog stats");
                None
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        CostingStatus {
            build: BuildStamp::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            catalog: catalog_stats,
            summary_options: options.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            as_of: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}
