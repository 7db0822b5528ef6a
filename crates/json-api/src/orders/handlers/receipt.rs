//! Order Receipt Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    oapi::extract::PathParam,
    prelude::*,
};

use storefront_app::{domain::orders::models::OrderId, receipts::buyer_for};

use crate::{
    extensions::*,
    orders::errors::{customer_status_error, into_status_error, render_status_error},
    state::State,
};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Order Receipt Handler
///
/// Renders the receipt of one of the caller's orders as a PDF document.
#[endpoint(
    tags("orders"),
    summary = "Download Order Receipt",
    responses(
        (status_code = StatusCode::OK, description = "PDF receipt"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Receipt could not be generated"),
    )
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let order = state
        .app
        .orders
        .get_order(owner, OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    let buyer = buyer_for(state.app.customers.as_ref(), owner)
        .await
        .map_err(customer_status_error)?;

    let document = state
        .app
        .receipts
        .render(&order, &buyer)
        .map_err(render_status_error)?;

    res.add_header(CONTENT_TYPE, PDF_CONTENT_TYPE, true)
        .or_500("failed to set content type header")?
        .add_header(
            CONTENT_DISPOSITION,
            format!("inline; filename=\"receipt-{}.pdf\"", order.order_number),
            true,
        )
        .or_500("failed to set content disposition header")?
        .body(document);

    Ok(())
}
