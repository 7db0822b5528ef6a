//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be between 1 and {max}, got {0}", max = u32::MAX)]
    InvalidQuantity(i64),

    #[error("product not found")]
    ProductNotFound,

    #[error("cart line not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("product lookup failed")]
    Catalog(#[source] ProductsServiceError),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("storage call timed out")]
    TimedOut(#[from] Elapsed),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            ProductsServiceError::TimedOut(elapsed) => Self::TimedOut(elapsed),
            other => Self::Catalog(other),
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
