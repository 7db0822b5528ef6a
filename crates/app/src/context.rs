//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, DatabaseSettings, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        categories::{CategoriesService, SqliteCategoriesService},
        checkout::{CheckoutService, SqliteCheckoutService},
        customers::{CustomersService, SqliteCustomersService},
        orders::{OrdersService, SqliteOrdersService},
        products::{ProductCatalog, ProductsService, SqliteProductsService},
    },
    receipts::{ReceiptRenderer, ReceiptSettings},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub categories: Arc<dyn CategoriesService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub customers: Arc<dyn CustomersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub receipts: Arc<ReceiptRenderer>,
}

impl AppContext {
    /// Connect to the database, apply migrations and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_settings(
        database: &DatabaseSettings,
        receipts: ReceiptSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(database)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(
            Db::new(pool, database.timeout),
            ReceiptRenderer::new(receipts),
        ))
    }

    /// Build every service on top of an existing database handle.
    #[must_use]
    pub fn from_db(db: Db, receipts: ReceiptRenderer) -> Self {
        let products = Arc::new(SqliteProductsService::new(db.clone()));
        let carts: Arc<dyn CartsService> =
            Arc::new(SqliteCartsService::new(db.clone(), products.clone()));

        Self {
            catalog: products.clone(),
            categories: Arc::new(SqliteCategoriesService::new(db.clone())),
            checkout: Arc::new(SqliteCheckoutService::new(
                db.clone(),
                carts.clone(),
                products.clone(),
            )),
            orders: Arc::new(SqliteOrdersService::new(db.clone())),
            customers: Arc::new(SqliteCustomersService::new(db)),
            products,
            carts,
            receipts: Arc::new(receipts),
        }
    }
}
