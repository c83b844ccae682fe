//! Unified error types and result handling.
//!
//! Three fault families: validation faults raised before any store call,
//! store faults wrapping [`sea_orm::DbErr`] unchanged, and precondition
//! faults for operations invoked against a record in the wrong state.

use chrono::NaiveDate;
use thiserror::Error;

/// Every failure mode surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration, or a non-numeric input constraint
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A quantity or amount outside the accepted range (zero, negative,
    /// NaN, or infinite where positives are required)
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: f64 },

    /// A form field that should hold a number could not be parsed as one
    #[error("Not a number: {input:?}")]
    InvalidNumber { input: String },

    #[error("Product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("Material {id} not found")]
    MaterialNotFound { id: i64 },

    #[error("Batch {id} not found")]
    BatchNotFound { id: i64 },

    /// Precondition fault: the batch already left the draft state
    #[error("Batch {id} is already submitted")]
    BatchAlreadySubmitted { id: i64 },

    /// An issue movement would drive the material stock negative
    #[error("Insufficient stock: {current} on hand, {required} requested")]
    InsufficientStock { current: f64, required: f64 },

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The daily inventory sheet for this date was already registered
    #[error("Inventory for {date} is already registered")]
    InventoryAlreadyRegistered { date: NaiveDate },

    /// Store fault, propagated unchanged; no automatic retry
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
