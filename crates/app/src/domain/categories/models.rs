//! Category Models

use jiff::Timestamp;

use crate::ids::TypedId;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// Grouping products are browsed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category with the number of products a buyer can currently order from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub product_count: u64,
}
