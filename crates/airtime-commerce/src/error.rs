//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in pricing and cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Cart has no items to price.
    #[error("Cart is empty")]
    EmptyCart,

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A catalog deal fails its own invariants.
    #[error("Invalid deal {id}: {reason}")]
    InvalidDeal { id: String, reason: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
