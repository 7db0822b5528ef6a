//! Orders Data

use jiff::Timestamp;

use crate::{
    domain::orders::models::{OrderLine, OrderStatus},
    ids::OwnerId,
};

/// Order assembled by checkout, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub owner: OwnerId,
    pub order_date: Timestamp,
    pub shipping_address: String,
    pub payment_method: String,
    pub status: OrderStatus,
    pub total_amount: u64,
    pub lines: Vec<OrderLine>,
}
