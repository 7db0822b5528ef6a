//! Test support for service-level tests.

mod context;
mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
