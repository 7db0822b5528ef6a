//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::CartLineId;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the line
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Quantity updated or line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    line: PathParam<i64>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let updated = state
        .app
        .carts
        .update_quantity(
            owner,
            CartLineId::new(line.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    if !updated {
        return Err(StatusError::not_found().brief("Cart item not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
