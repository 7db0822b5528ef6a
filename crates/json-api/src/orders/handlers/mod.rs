//! Order Handlers

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod receipt;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{Order, OrderLine};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Order id
    pub id: i64,

    /// Human-readable order number
    pub order_number: String,

    /// The date and time the order was placed
    pub order_date: String,

    pub shipping_address: String,

    pub payment_method: String,

    /// One of `pending`, `completed`, `cancelled`
    pub status: String,

    /// Sum of the line totals in minor units
    pub total_amount: u64,

    /// Lines as priced when the order was placed
    pub lines: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_inner(),
            order_number: order.order_number,
            order_date: order.order_date.to_string(),
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            status: order.status.as_str().to_string(),
            total_amount: order.total_amount,
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_id: i64,

    /// Product name when the order was placed
    pub product_name: String,

    pub quantity: u32,

    /// Unit price when the order was placed, in minor units
    pub unit_price: u64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product_id: line.product.into_inner(),
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}
