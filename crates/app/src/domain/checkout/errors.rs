//! Checkout errors.

use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::domain::{carts::CartsServiceError, products::ProductsServiceError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("cart is empty")]
    EmptyCart,

    #[error("order total overflows")]
    TotalOverflow,

    #[error("could not allocate a unique order number after {0} attempts")]
    OrderNumberExhausted(usize),

    #[error("cart lookup failed")]
    Cart(#[source] CartsServiceError),

    #[error("product lookup failed")]
    Catalog(#[source] ProductsServiceError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("storage call timed out")]
    TimedOut(#[from] Elapsed),
}

impl CheckoutError {
    /// Whether the input was rejected before anything was read or written.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::FieldTooLong { .. })
    }
}

impl From<CartsServiceError> for CheckoutError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::TimedOut(elapsed) => Self::TimedOut(elapsed),
            other => Self::Cart(other),
        }
    }
}

impl From<ProductsServiceError> for CheckoutError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::TimedOut(elapsed) => Self::TimedOut(elapsed),
            other => Self::Catalog(other),
        }
    }
}
