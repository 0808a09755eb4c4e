//! Import a JSON catalog into the SQLite catalog
//! Usage: cargo run --bin seed_catalog -- <catalog.json>

use std::path::PathBuf;

use recipe_costing::catalog::{InMemoryCatalog, SqliteCatalog};
use recipe_costing::config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let source_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample_catalog.json"));

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    println!("Source: {}", source_path.display());
    println!("Catalog: {}", db_path.display());

    let source = InMemoryCatalog::from_json_file(&source_path)?;
    let catalog = SqliteCatalog::open(&db_path)?;
    let stats = catalog.import(&source)?;

    println!("Imported {} recipes ({} line items)", stats.recipes, stats.line_items);
    println!(
        "Imported {} products ({} supplier offers, {} nutrient facts)",
        stats.products, stats.supplier_products, stats.nutrient_facts
    );
    println!("Imported {} conversion rules", stats.conversion_rules);

    Ok(())
}
