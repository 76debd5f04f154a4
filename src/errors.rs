//! Unified error types for the reconciliation engine.
//!
//! Pure helpers (name normalization, matching, classification, SKU
//! generation) never fail; every `Err` in this crate comes from a
//! persistence step or from validation performed before one. Deletes treat
//! a row that is already gone as success rather than an error.

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Required scoping or input data is missing; raised before any mutation
    #[error("Validation error: {message}")]
    Validation {
        /// Which requirement was violated
        message: String,
    },

    /// The supplier invoice no longer exists
    #[error("Supplier invoice not found: {id}")]
    InvoiceNotFound {
        /// Invoice primary key, stringified for display
        id: String,
    },

    /// The addressed line item is not on the invoice
    #[error("Line item {line_item_id} not found on invoice {invoice_id}")]
    LineItemNotFound {
        /// Invoice primary key
        invoice_id: i64,
        /// Stable line-item identifier
        line_item_id: String,
    },

    /// The catalog entry no longer exists
    #[error("Material not found: {id}")]
    MaterialNotFound {
        /// Material primary key, stringified for display
        id: String,
    },

    /// The price approval record no longer exists
    #[error("Price approval not found: {id}")]
    ApprovalNotFound {
        /// Approval primary key, stringified for display
        id: String,
    },

    /// A price, discount, or quantity is out of range or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: f64,
    },

    /// The underlying store rejected a read or write
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
