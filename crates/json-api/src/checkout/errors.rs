//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::checkout::CheckoutError;

const RETRY_MESSAGE: &str = "Checkout failed, please try again";

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::MissingField { .. } | CheckoutError::FieldTooLong { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        CheckoutError::EmptyCart => StatusError::conflict().brief("Cart is empty"),
        CheckoutError::TotalOverflow
        | CheckoutError::OrderNumberExhausted(_)
        | CheckoutError::Cart(_)
        | CheckoutError::Catalog(_)
        | CheckoutError::Sql(_)
        | CheckoutError::TimedOut(_) => {
            error!(error = ?error, "checkout failed");

            StatusError::internal_server_error().brief(RETRY_MESSAGE)
        }
    }
}
