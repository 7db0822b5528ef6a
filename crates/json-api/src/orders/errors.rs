//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::{
    domain::{customers::CustomersServiceError, orders::OrdersServiceError},
    receipts::RenderError,
};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidTransition { from, to } => StatusError::conflict()
            .brief(format!("Order cannot move from {from} to {to}")),
        OrdersServiceError::StatusChanged { .. } => {
            StatusError::conflict().brief("Order status changed, reload and try again")
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order request")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::TimedOut(_elapsed) => {
            error!("order storage timed out");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn customer_status_error(error: CustomersServiceError) -> StatusError {
    error!("buyer lookup for receipt failed: {error}");

    StatusError::internal_server_error()
}

pub(crate) fn render_status_error(error: RenderError) -> StatusError {
    error!("receipt rendering failed: {error}");

    StatusError::internal_server_error().brief("Receipt could not be generated, try again later")
}
