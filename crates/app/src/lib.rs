//! Storefront domain services, persistence and receipt rendering.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod receipts;

#[cfg(test)]
mod test;
