//! Recipe Costing
//!
//! An MCP server for cheapest-supplier recipe costing.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use recipe_costing::build_info;
use recipe_costing::catalog::SqliteCatalog;
use recipe_costing::config;
use recipe_costing::mcp::CostingService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipe_costing=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let db_path = config::database_path();
    let options = config::summary_options();
    eprintln!("{}", build_info::startup_banner(&db_path, &options));

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Opening runs migrations
    let catalog = SqliteCatalog::open(&db_path)?;
    let stats = catalog.stats()?;
    eprintln!(
        "Catalog: {} recipes, {} products, {} conversion rules",
        stats.recipes, stats.products, stats.conversion_rules
    );
    eprintln!("Starting MCP server on stdio...");

    let service = CostingService::new(db_path, catalog, options);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
