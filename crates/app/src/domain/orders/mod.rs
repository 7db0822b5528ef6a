//! Orders

pub mod data;
pub mod errors;
pub mod models;
pub mod numbers;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
