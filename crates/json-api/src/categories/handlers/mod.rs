//! Category Handlers

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod products;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::categories::models::{Category, CategorySummary};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// Category id
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Number of products a buyer can currently order, on listings only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product_count: Option<u64>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id.into_inner(),
            name: category.name,
            description: category.description,
            product_count: None,
        }
    }
}

impl From<CategorySummary> for CategoryResponse {
    fn from(summary: CategorySummary) -> Self {
        CategoryResponse {
            product_count: Some(summary.product_count),
            ..summary.category.into()
        }
    }
}
