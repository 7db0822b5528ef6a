//! Owner identity handed in by the upstream gateway.

pub(crate) mod middleware;
