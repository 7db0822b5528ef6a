//! Category Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::categories::models::CategoryId;

use crate::{
    extensions::*,
    products::{ProductResponse, into_product_status_error},
    state::State,
};

/// Category Products Handler
///
/// Returns the orderable products in a category, newest first.
#[endpoint(
    tags("categories"),
    summary = "List Category Products",
    responses(
        (status_code = StatusCode::OK, description = "Products in the category"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    )
)]
pub(crate) async fn handler(
    category: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products_by_category(CategoryId::new(category.into_inner()))
        .await
        .map_err(into_product_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
