//! New Arrivals Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::products::DEFAULT_NEW_ARRIVALS;

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

const MAX_NEW_ARRIVALS: u32 = 50;

/// New Arrivals Handler
///
/// Returns the most recently added products a buyer can order.
#[endpoint(
    tags("products"),
    summary = "New Arrivals",
    responses(
        (status_code = StatusCode::OK, description = "Newest products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Limit out of range"),
    )
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let limit = limit.into_inner().unwrap_or(DEFAULT_NEW_ARRIVALS);

    if limit == 0 || limit > MAX_NEW_ARRIVALS {
        return Err(StatusError::bad_request()
            .brief(format!("limit must be between 1 and {MAX_NEW_ARRIVALS}")));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .new_arrivals(limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
