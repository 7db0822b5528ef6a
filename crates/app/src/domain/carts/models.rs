//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::products::models::ProductId,
    ids::{OwnerId, TypedId},
};

/// Cart Line Id
pub type CartLineId = TypedId<CartLine>;

/// One product and quantity held in an owner's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: CartLineId,
    pub owner: OwnerId,
    pub product: ProductId,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart line joined with the live product it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub line: CartLine,
    pub product_name: Option<String>,
    pub unit_price: u64,

    /// False once the product has been deleted from the catalog.
    pub available: bool,
}

impl CartItem {
    /// Live price of the line, zero when the product is unavailable.
    ///
    /// Returns `None` if the amount overflows.
    pub fn line_total(&self) -> Option<u64> {
        if !self.available {
            return Some(0);
        }

        self.unit_price.checked_mul(u64::from(self.line.quantity))
    }
}
