//! Checkout

mod errors;
pub(crate) mod handlers;
