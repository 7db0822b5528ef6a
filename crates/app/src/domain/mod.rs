//! Storefront Domain Concerns

pub mod carts;
pub mod categories;
pub mod checkout;
pub mod customers;
pub mod orders;
pub mod products;
