//! Products Data

use crate::domain::categories::models::CategoryId;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock_quantity: u32,
    pub category: Option<CategoryId>,
    pub featured: bool,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock_quantity: u32,
    pub category: Option<CategoryId>,
    pub featured: bool,
}
