//! Costing error types

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::models::{UnitOfMeasure, UoMName, UoMType};

/// Errors raised while converting, pricing, or summarizing
#[derive(Debug, Error)]
pub enum CostingError {
    #[error("Couldn't convert {from_name} ({from_type}) to {to_name} ({to_type})")]
    ConversionNotFound {
        from_name: UoMName,
        from_type: UoMType,
        to_name: UoMName,
        to_type: UoMType,
    },

    #[error("{quantity} has a negative or non-finite amount")]
    InvalidAmount { quantity: UnitOfMeasure },

    #[error("Conversion factor {factor} from {from_name} ({from_type}) to {to_name} ({to_type}) is negative or non-finite")]
    InvalidFactor {
        from_name: UoMName,
        from_type: UoMType,
        to_name: UoMName,
        to_type: UoMType,
        factor: f64,
    },

    #[error("{quantity} is zero in base unit {base_name}; cannot compute a unit cost")]
    ZeroQuantity {
        quantity: UnitOfMeasure,
        base_name: UoMName,
    },

    #[error("No supplier offers for ingredient '{ingredient}' in recipe '{recipe}'")]
    NoSupplierOffers { recipe: String, ingredient: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type for costing operations
pub type CostingResult<T> = Result<T, CostingError>;
