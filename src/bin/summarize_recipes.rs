//! Print cheapest-cost summaries for every recipe as JSON
//! Usage: cargo run --bin summarize_recipes -- [catalog.json]
//!
//! Without an argument the SQLite catalog is used.

use recipe_costing::catalog::{Catalog, InMemoryCatalog, SqliteCatalog};
use recipe_costing::config;
use recipe_costing::Costing;

fn run(catalog: &dyn Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let costing = Costing::new(catalog)?.with_options(config::summary_options());
    let summaries = costing.summarize_all()?;

    for (name, summary) in &summaries {
        if !summary.is_fully_priced() {
            eprintln!(
                "warning: '{}' has unpriced ingredients: {}",
                name,
                summary.unpriced_ingredients.join(", ")
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match std::env::args().nth(1) {
        Some(path) => run(&InMemoryCatalog::from_json_file(path)?),
        None => run(&SqliteCatalog::open(config::database_path())?),
    }
}
