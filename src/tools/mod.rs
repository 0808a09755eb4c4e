//! Costing Tools module
//!
//! MCP tool implementations for recipe costing.

pub mod costing;
pub mod status;
