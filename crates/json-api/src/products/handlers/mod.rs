//! Product Handlers

pub(crate) mod featured;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod new_arrivals;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::Product;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product id
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Unit price in minor units
    pub price: u64,

    /// Units in stock
    pub stock_quantity: u32,

    /// Category the product is listed under
    pub category_id: Option<i64>,

    pub featured: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.into_inner(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            category_id: product.category.map(|category| category.into_inner()),
            featured: product.featured,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
