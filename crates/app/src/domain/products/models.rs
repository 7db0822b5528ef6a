//! Product Models

use jiff::Timestamp;

use crate::{domain::categories::models::CategoryId, ids::TypedId};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock_quantity: u32,
    pub category: Option<CategoryId>,

    /// Highlighted on the storefront front page.
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Read-only view of a product at the moment it was resolved.
///
/// Never persisted. Checkout copies `name` and `unit_price` into order lines so
/// later product edits cannot change what was charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub unit_price: u64,
    pub available_stock: u32,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            available_stock: product.stock_quantity,
        }
    }
}
