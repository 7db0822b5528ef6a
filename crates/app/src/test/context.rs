//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::domain::{
    carts::SqliteCartsService,
    categories::SqliteCategoriesService,
    checkout::SqliteCheckoutService,
    customers::SqliteCustomersService,
    orders::{SqliteOrdersService, numbers::OrderNumberSource},
    products::SqliteProductsService,
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: SqliteProductsService,
    pub categories: SqliteCategoriesService,
    pub carts: SqliteCartsService,
    pub orders: SqliteOrdersService,
    pub customers: SqliteCustomersService,
    pub checkout: SqliteCheckoutService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = test_db.db();

        let products = SqliteProductsService::new(db.clone());
        let carts = SqliteCartsService::new(db.clone(), Arc::new(products.clone()));
        let checkout = SqliteCheckoutService::new(
            db.clone(),
            Arc::new(carts.clone()),
            Arc::new(products.clone()),
        );

        Self {
            categories: SqliteCategoriesService::new(db.clone()),
            orders: SqliteOrdersService::new(db.clone()),
            customers: SqliteCustomersService::new(db),
            products,
            carts,
            checkout,
            db: test_db,
        }
    }

    /// Checkout service sharing this context's database and cart, with scripted order numbers.
    pub fn checkout_with_numbers(
        &self,
        numbers: Arc<dyn OrderNumberSource>,
    ) -> SqliteCheckoutService {
        SqliteCheckoutService::with_order_numbers(
            self.db.db(),
            Arc::new(self.carts.clone()),
            Arc::new(self.products.clone()),
            numbers,
        )
    }
}
