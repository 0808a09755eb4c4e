//! Recipe Costing MCP Server Implementation
//!
//! Implements the MCP server with all costing tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::SqliteCatalog;
use crate::costing::SummaryOptions;
use crate::tools::costing;
use crate::tools::status::StatusTracker;

/// Recipe Costing MCP Service
#[derive(Clone)]
pub struct CostingService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    catalog: SqliteCatalog,
    options: SummaryOptions,
    tool_router: ToolRouter<CostingService>,
}

impl CostingService {
    pub fn new(database_path: PathBuf, catalog: SqliteCatalog, options: SummaryOptions) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            catalog,
            options,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummarizeRecipeParams {
    /// Exact recipe name
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheapestOfferParams {
    /// Ingredient name as used in recipe line items
    pub ingredient: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    /// Quantity to convert (non-negative)
    pub amount: f64,
    /// Source unit name, e.g. "cups", "kilograms", "fluidOunces"
    pub from_name: String,
    /// Source unit type: mass, volume, or count
    pub from_type: String,
    /// Target unit name
    pub to_name: String,
    /// Target unit type: mass, volume, or count
    pub to_type: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImportCatalogParams {
    /// Path to a JSON catalog file
    pub file_path: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CostingService {
    // --- Status ---

    #[tool(description = "Get the current status of the costing service including build info, catalog row counts, and process information")]
    async fn costing_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.catalog, &self.options);
        to_json(&status)
    }

    #[tool(description = "Get instructions for reading recipe cost summaries. Call this before interpreting costing results.")]
    fn costing_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::COSTING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(COSTING_INSTRUCTIONS)]))
    }

    // --- Recipes ---

    #[tool(description = "List all recipes in the catalog with their ingredients")]
    fn list_recipes(&self) -> Result<CallToolResult, McpError> {
        let result = costing::list_recipes(&self.catalog)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Compute the cheapest cost and aggregated nutrients for every recipe in the catalog")]
    fn summarize_recipes(&self) -> Result<CallToolResult, McpError> {
        let result = costing::summarize_recipes(&self.catalog, &self.options)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Compute the cheapest cost and aggregated nutrients for one recipe by exact name")]
    fn summarize_recipe(&self, Parameters(p): Parameters<SummarizeRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = costing::summarize_recipe(&self.catalog, &p.name, &self.options)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(summary) => to_json(&summary),
            None => to_json(&serde_json::json!({ "error": "Recipe not found", "name": p.name })),
        }
    }

    // --- Pricing ---

    #[tool(description = "Find the cheapest supplier offer (price per base unit) for an ingredient")]
    fn cheapest_offer(&self, Parameters(p): Parameters<CheapestOfferParams>) -> Result<CallToolResult, McpError> {
        let result = costing::cheapest_offer(&self.catalog, &p.ingredient)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a quantity between units using the catalog's conversion rules (direct rules only)")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        let from = costing::parse_unit(&p.from_name, &p.from_type)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let to = costing::parse_unit(&p.to_name, &p.to_type)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = costing::convert_units(&self.catalog, p.amount, from, to)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Catalog ---

    #[tool(description = "Replace the whole catalog with the contents of a JSON catalog file")]
    fn import_catalog(&self, Parameters(p): Parameters<ImportCatalogParams>) -> Result<CallToolResult, McpError> {
        let result = costing::import_catalog_json(&self.catalog, std::path::Path::new(&p.file_path))
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CostingService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe_costing".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Recipe Costing".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe Costing - cheapest-supplier recipe pricing with aggregated nutrients. \
                 Call costing_instructions before interpreting results. \
                 Recipes: list_recipes, summarize_recipes, summarize_recipe. \
                 Pricing: cheapest_offer, convert_units. \
                 Catalog: import_catalog. Status: costing_status."
                    .into(),
            ),
        }
    }
}
