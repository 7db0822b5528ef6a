//! Checkout
//!
//! Turns an owner's cart into a persisted order with frozen prices, then
//! clears the cart.

pub mod data;
pub mod errors;
mod locks;
pub mod service;
mod snapshot;

pub use errors::CheckoutError;
pub use service::*;
pub use snapshot::UNKNOWN_PRODUCT_NAME;
