//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::CartItem;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The lines in the cart, oldest first
    pub items: Vec<CartItemResponse>,

    /// Sum of the lines at live prices, in minor units
    pub total: u64,

    /// Sum of quantities across all lines
    pub item_count: u64,
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// Cart line id
    pub id: i64,

    pub product_id: i64,

    /// Live product name; absent once the product was deleted
    pub product_name: Option<String>,

    pub quantity: u32,

    /// Live unit price in minor units
    pub unit_price: u64,

    /// False once the product was deleted
    pub available: bool,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.line.id.into_inner(),
            product_id: item.line.product.into_inner(),
            product_name: item.product_name,
            quantity: item.line.quantity,
            unit_price: item.unit_price,
            available: item.available,
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart. An empty cart is not an error.
#[endpoint(tags("cart"), summary = "Get Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let carts = &state.app.carts;

    let items = carts.list_items(owner).await.map_err(into_status_error)?;
    let total = carts.total(owner).await.map_err(into_status_error)?;
    let item_count = carts.item_count(owner).await.map_err(into_status_error)?;

    Ok(Json(CartResponse {
        items: items.into_iter().map(Into::into).collect(),
        total,
        item_count,
    }))
}
