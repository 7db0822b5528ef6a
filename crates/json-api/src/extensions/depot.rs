//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::ids::OwnerId;

const OWNER_DEPOT_KEY: &str = "owner_id";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_owner(&mut self, owner: OwnerId);

    fn owner_or_401(&self) -> Result<OwnerId, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_owner(&mut self, owner: OwnerId) {
        self.insert(OWNER_DEPOT_KEY, owner);
    }

    fn owner_or_401(&self) -> Result<OwnerId, StatusError> {
        self.get::<OwnerId>(OWNER_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
